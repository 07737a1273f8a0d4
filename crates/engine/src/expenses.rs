//! Expense records.
//!
//! An `Expense` is a single spending entry. `date` is stamped by the engine at
//! creation time and `user_id` is a weak reference: it is never checked
//! against the users table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i32,
    pub title: Option<String>,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub user_id: Option<i32>,
}

/// Fields accepted when creating an expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseNew {
    pub title: Option<String>,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub user_id: Option<i32>,
}

/// Partial update of an expense.
///
/// `None` leaves the stored value untouched. For the nullable columns the
/// inner option distinguishes "set to null" (`Some(None)`) from "not provided".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub title: Option<Option<String>>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub user_id: Option<Option<i32>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.user_id.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: Option<String>,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            amount: model.amount,
            date: model.date,
            category: model.category,
            user_id: model.user_id,
        }
    }
}
