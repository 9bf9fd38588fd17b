use serde::{Deserialize, Serialize};

mod money;

pub use money::{Amount, AmountError};

/// Error body returned by the server on any non-success status.
///
/// The `error` field is optional: clients fall back to a generic message when
/// it is missing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// Plain acknowledgement returned by create/logout endpoints.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Signup {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    /// Returned by `/api/login` and `/api/signup`; the session itself travels
    /// as a cookie.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct SessionCreated {
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub name: Option<String>,
    }

    /// Returned by `/api/me`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Profile {
        pub id: i64,
        pub name: String,
        pub email: String,
        #[serde(default)]
        pub bio: Option<String>,
    }
}

pub mod budget {
    use std::fmt;

    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Period {
        #[default]
        Monthly,
        Semester,
        Yearly,
    }

    impl Period {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Monthly => "Monthly",
                Self::Semester => "Semester",
                Self::Yearly => "Yearly",
            }
        }

        /// Next option in select order, wrapping around.
        pub fn next(self) -> Self {
            match self {
                Self::Monthly => Self::Semester,
                Self::Semester => Self::Yearly,
                Self::Yearly => Self::Monthly,
            }
        }

        pub fn prev(self) -> Self {
            match self {
                Self::Monthly => Self::Yearly,
                Self::Semester => Self::Monthly,
                Self::Yearly => Self::Semester,
            }
        }
    }

    impl fmt::Display for Period {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BudgetPlan {
        pub id: i64,
        pub category: String,
        pub amount: Amount,
        /// Stored exactly as it was submitted, so it may fall outside
        /// [`Period`].
        pub period: String,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    /// Request body for `POST /api/budgets`.
    ///
    /// `amount` is the raw form value; the server parses and validates it.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub category: String,
        pub amount: String,
        pub period: Period,
    }
}

pub mod expense {
    use chrono::NaiveDate;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i64,
        pub title: String,
        pub category: String,
        pub amount: Amount,
        /// ISO date (`YYYY-MM-DD`) as stored by the server.
        pub spent_on: String,
        #[serde(default)]
        pub image_url: Option<String>,
        #[serde(default)]
        pub note: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    impl Expense {
        pub fn spent_on_date(&self) -> Option<NaiveDate> {
            NaiveDate::parse_from_str(self.spent_on.trim(), "%Y-%m-%d").ok()
        }

        /// The server stores missing optionals as empty strings.
        pub fn note(&self) -> Option<&str> {
            self.note.as_deref().filter(|note| !note.trim().is_empty())
        }

        pub fn image_url(&self) -> Option<&str> {
            self.image_url.as_deref().filter(|url| !url.trim().is_empty())
        }
    }

    /// Request body for `POST /api/expenses`.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        pub category: String,
        pub amount: String,
        pub spent_on: String,
        pub image_url: String,
        pub note: String,
    }
}

pub mod note {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Note {
        pub id: i64,
        pub title: String,
        pub content: String,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct NoteNew {
        pub title: String,
        pub content: String,
    }
}

pub mod message {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Message {
        pub id: i64,
        pub username: String,
        pub text: String,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    /// Request body for `POST /api/messages`; the username comes from the
    /// session.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MessageNew {
        pub text: String,
    }
}

pub mod summary {
    use super::*;

    /// Server-side aggregate for the logged-in user.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Summary {
        pub username: String,
        pub budget_total: Amount,
        pub expense_total: Amount,
        pub remaining: Amount,
        pub transaction_count: u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_treats_blank_optionals_as_missing() {
        let expense: expense::Expense = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Lunch",
            "category": "Food",
            "amount": 120.0,
            "note": "",
            "image_url": "  ",
            "spent_on": "2024-05-01",
            "created_at": "2024-05-01T12:00:00"
        }))
        .unwrap();

        assert_eq!(expense.note(), None);
        assert_eq!(expense.image_url(), None);
        assert_eq!(
            expense.spent_on_date(),
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn period_cycles_in_select_order() {
        use budget::Period;
        assert_eq!(Period::Monthly.next(), Period::Semester);
        assert_eq!(Period::Yearly.next(), Period::Monthly);
        assert_eq!(Period::Monthly.prev(), Period::Yearly);
    }

    #[test]
    fn error_response_field_is_optional() {
        let empty: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.error.is_none());

        let msg: ErrorResponse =
            serde_json::from_str(r#"{"error":"invalid credentials"}"#).unwrap();
        assert_eq!(msg.error.as_deref(), Some("invalid credentials"));
    }

    #[test]
    fn budget_rows_keep_any_period_text() {
        let budgets: Vec<budget::BudgetPlan> = serde_json::from_value(serde_json::json!([
            { "id": 1, "category": "Food", "amount": 3000, "period": "Monthly" },
            { "id": 2, "category": "Travel", "amount": 800.5, "period": "monthly" },
            { "id": 3, "category": "Gym", "amount": 120, "period": "Weekly" }
        ]))
        .unwrap();

        let periods: Vec<&str> = budgets.iter().map(|b| b.period.as_str()).collect();
        assert_eq!(periods, ["Monthly", "monthly", "Weekly"]);
        assert_eq!(budgets[1].amount, Amount::new(80_050));
    }

    #[test]
    fn summary_parses_rounded_totals() {
        let summary: summary::Summary = serde_json::from_str(
            r#"{"username":"Asha","budget_total":5000,"expense_total":120.5,
                "remaining":4879.5,"transaction_count":1}"#,
        )
        .unwrap();
        assert_eq!(summary.remaining, Amount::new(487_950));
        assert_eq!(summary.transaction_count, 1);
    }
}
