use chrono::Local;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Category, EngineError, Expense, ExpenseNew, ExpensePatch, ResultEngine, expenses,
};

use super::{Engine, with_tx};

const EXPENSE_NOT_FOUND: &str = "expense not found";
const DATE_FORMAT: &str = "%Y-%m-%d";

impl Engine {
    /// Create an expense and return its id.
    ///
    /// `date` is set to the current UTC day. The category is stored as given:
    /// unlike [`Engine::update_expense`], creation does not check it against
    /// [`Category`].
    pub async fn new_expense(&self, input: ExpenseNew) -> ResultEngine<i32> {
        let active = expenses::ActiveModel {
            title: ActiveValue::Set(input.title),
            description: ActiveValue::Set(input.description),
            amount: ActiveValue::Set(input.amount),
            date: ActiveValue::Set(today()),
            category: ActiveValue::Set(input.category),
            user_id: ActiveValue::Set(input.user_id),
            ..Default::default()
        };
        let model = active.insert(&self.database).await?;

        tracing::debug!(expense_id = model.id, "expense created");
        Ok(model.id)
    }

    /// Return an expense by id.
    pub async fn expense(&self, expense_id: i32) -> ResultEngine<Expense> {
        expenses::Entity::find_by_id(expense_id)
            .one(&self.database)
            .await?
            .map(Expense::from)
            .ok_or_else(|| EngineError::KeyNotFound(EXPENSE_NOT_FOUND.to_string()))
    }

    /// Return every expense, oldest first.
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Apply a partial update to an expense.
    ///
    /// The patch is validated as a whole before anything is written: an empty
    /// patch or a category outside [`Category`] fails and leaves the record
    /// untouched.
    pub async fn update_expense(&self, expense_id: i32, patch: ExpensePatch) -> ResultEngine<()> {
        if patch.is_empty() {
            return Err(EngineError::InvalidField(
                "provide at least one of title, description, amount, category or user_id"
                    .to_string(),
            ));
        }
        let category = patch
            .category
            .as_deref()
            .map(Category::try_from)
            .transpose()?;

        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(expense_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(EXPENSE_NOT_FOUND.to_string()))?;

            let mut active: expenses::ActiveModel = model.into();
            if let Some(title) = patch.title {
                active.title = ActiveValue::Set(title);
            }
            if let Some(description) = patch.description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(amount) = patch.amount {
                active.amount = ActiveValue::Set(amount);
            }
            if let Some(category) = category {
                active.category = ActiveValue::Set(category.as_str().to_string());
            }
            if let Some(user_id) = patch.user_id {
                active.user_id = ActiveValue::Set(user_id);
            }
            active.update(&db_tx).await?;

            tracing::debug!(expense_id, "expense updated");
            Ok(())
        })
    }

    /// Delete an expense.
    pub async fn delete_expense(&self, expense_id: i32) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(expense_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(EXPENSE_NOT_FOUND.to_string()));
        }

        tracing::debug!(expense_id, "expense deleted");
        Ok(())
    }
}

/// Calendar day in the server's local time zone.
fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}
