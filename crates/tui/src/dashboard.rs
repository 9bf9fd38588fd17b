//! Working set of the authenticated user: the five resident collections, one
//! draft per creatable kind, and the reload/submit protocol around them.

use api_types::{
    Ack,
    auth::Profile,
    budget::{BudgetNew, BudgetPlan, Period},
    expense::{Expense, ExpenseNew},
    message::{Message, MessageNew},
    note::{Note, NoteNew},
    summary::Summary,
};

use crate::client::{Client, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Transactions,
    Profile,
    Notes,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Transactions,
        Tab::Profile,
        Tab::Notes,
        Tab::Chat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Transactions => "transactions",
            Self::Profile => "profile",
            Self::Notes => "notes",
            Self::Chat => "chat",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Editable fields shown on this tab, in focus order.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            Self::Dashboard => &[
                FormField::BudgetCategory,
                FormField::BudgetAmount,
                FormField::BudgetPeriod,
                FormField::ExpenseTitle,
                FormField::ExpenseCategory,
                FormField::ExpenseAmount,
                FormField::ExpenseSpentOn,
                FormField::ExpenseImageUrl,
                FormField::ExpenseNote,
            ],
            Self::Notes => &[FormField::NoteTitle, FormField::NoteContent],
            Self::Chat => &[FormField::ChatText],
            Self::Transactions | Self::Profile => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Budget,
    Expense,
    Note,
    Chat,
}

impl DraftKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Expense => "expense",
            Self::Note => "note",
            Self::Chat => "message",
        }
    }
}

/// What a form input accepts, mirroring the input types of the web form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Date,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    BudgetCategory,
    BudgetAmount,
    BudgetPeriod,
    ExpenseTitle,
    ExpenseCategory,
    ExpenseAmount,
    ExpenseSpentOn,
    ExpenseImageUrl,
    ExpenseNote,
    NoteTitle,
    NoteContent,
    ChatText,
}

impl FormField {
    pub fn kind(self) -> DraftKind {
        match self {
            Self::BudgetCategory | Self::BudgetAmount | Self::BudgetPeriod => DraftKind::Budget,
            Self::ExpenseTitle
            | Self::ExpenseCategory
            | Self::ExpenseAmount
            | Self::ExpenseSpentOn
            | Self::ExpenseImageUrl
            | Self::ExpenseNote => DraftKind::Expense,
            Self::NoteTitle | Self::NoteContent => DraftKind::Note,
            Self::ChatText => DraftKind::Chat,
        }
    }

    pub fn input(self) -> InputKind {
        match self {
            Self::BudgetAmount | Self::ExpenseAmount => InputKind::Number,
            Self::ExpenseSpentOn => InputKind::Date,
            Self::BudgetPeriod => InputKind::Select,
            _ => InputKind::Text,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::BudgetCategory | Self::ExpenseCategory => "Category",
            Self::BudgetAmount | Self::ExpenseAmount => "Amount",
            Self::BudgetPeriod => "Period",
            Self::ExpenseTitle | Self::NoteTitle => "Title",
            Self::ExpenseSpentOn => "YYYY-MM-DD",
            Self::ExpenseImageUrl => "Image URL",
            Self::ExpenseNote => "Notes",
            Self::NoteContent => "Write your notes...",
            Self::ChatText => "Send a message...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Push(char),
    Pop,
    Next,
    Prev,
}

fn accepts(input: InputKind, current: &str, ch: char) -> bool {
    match input {
        InputKind::Text => !ch.is_control(),
        InputKind::Number => ch.is_ascii_digit() || (ch == '.' && !current.contains('.')),
        InputKind::Date => (ch.is_ascii_digit() || ch == '-') && current.len() < 10,
        InputKind::Select => false,
    }
}

/// Returns the edited copy of a text value, or the value unchanged if the edit
/// is not allowed for this input.
fn edited(input: InputKind, current: &str, edit: FieldEdit) -> String {
    let mut value = current.to_string();
    match edit {
        FieldEdit::Push(ch) if accepts(input, current, ch) => value.push(ch),
        FieldEdit::Pop => {
            value.pop();
        }
        _ => {}
    }
    value
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetDraft {
    pub category: String,
    pub amount: String,
    pub period: Period,
}

impl Default for BudgetDraft {
    fn default() -> Self {
        Self {
            category: "Food".to_string(),
            amount: String::new(),
            period: Period::Monthly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub category: String,
    pub amount: String,
    pub spent_on: String,
    pub image_url: String,
    pub note: String,
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: "General".to_string(),
            amount: String::new(),
            spent_on: String::new(),
            image_url: String::new(),
            note: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatDraft {
    pub text: String,
}

/// A snapshot of one kind's draft, ready to be posted by [`Draft::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Budget(BudgetDraft),
    Expense(ExpenseDraft),
    Note(NoteDraft),
    Chat(ChatDraft),
}

impl Draft {
    pub fn kind(&self) -> DraftKind {
        match self {
            Self::Budget(_) => DraftKind::Budget,
            Self::Expense(_) => DraftKind::Expense,
            Self::Note(_) => DraftKind::Note,
            Self::Chat(_) => DraftKind::Chat,
        }
    }

    pub async fn submit(&self, client: &Client) -> Result<Ack, ClientError> {
        match self {
            Self::Budget(draft) => {
                client
                    .create_budget(&BudgetNew {
                        category: draft.category.clone(),
                        amount: draft.amount.clone(),
                        period: draft.period,
                    })
                    .await
            }
            Self::Expense(draft) => {
                client
                    .create_expense(&ExpenseNew {
                        title: draft.title.clone(),
                        category: draft.category.clone(),
                        amount: draft.amount.clone(),
                        spent_on: draft.spent_on.clone(),
                        image_url: draft.image_url.clone(),
                        note: draft.note.clone(),
                    })
                    .await
            }
            Self::Note(draft) => {
                client
                    .create_note(&NoteNew {
                        title: draft.title.clone(),
                        content: draft.content.clone(),
                    })
                    .await
            }
            Self::Chat(draft) => {
                client
                    .send_message(&MessageNew {
                        text: draft.text.clone(),
                    })
                    .await
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drafts {
    pub budget: BudgetDraft,
    pub expense: ExpenseDraft,
    pub note: NoteDraft,
    pub chat: ChatDraft,
}

impl Drafts {
    pub fn get(&self, kind: DraftKind) -> Draft {
        match kind {
            DraftKind::Budget => Draft::Budget(self.budget.clone()),
            DraftKind::Expense => Draft::Expense(self.expense.clone()),
            DraftKind::Note => Draft::Note(self.note.clone()),
            DraftKind::Chat => Draft::Chat(self.chat.clone()),
        }
    }

    pub fn reset(&mut self, kind: DraftKind) {
        match kind {
            DraftKind::Budget => self.budget = BudgetDraft::default(),
            DraftKind::Expense => self.expense = ExpenseDraft::default(),
            DraftKind::Note => self.note = NoteDraft::default(),
            DraftKind::Chat => self.chat = ChatDraft::default(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::BudgetCategory => &self.budget.category,
            FormField::BudgetAmount => &self.budget.amount,
            FormField::BudgetPeriod => self.budget.period.as_str(),
            FormField::ExpenseTitle => &self.expense.title,
            FormField::ExpenseCategory => &self.expense.category,
            FormField::ExpenseAmount => &self.expense.amount,
            FormField::ExpenseSpentOn => &self.expense.spent_on,
            FormField::ExpenseImageUrl => &self.expense.image_url,
            FormField::ExpenseNote => &self.expense.note,
            FormField::NoteTitle => &self.note.title,
            FormField::NoteContent => &self.note.content,
            FormField::ChatText => &self.chat.text,
        }
    }

    /// Applies one edit to a field, replacing that kind's draft record.
    pub fn edit(&mut self, field: FormField, edit: FieldEdit) {
        let new = edited(field.input(), self.value(field), edit);
        match field {
            FormField::BudgetPeriod => {
                let period = match edit {
                    FieldEdit::Next | FieldEdit::Push(' ') => self.budget.period.next(),
                    FieldEdit::Prev => self.budget.period.prev(),
                    _ => self.budget.period,
                };
                self.budget = BudgetDraft {
                    period,
                    ..self.budget.clone()
                };
            }
            FormField::BudgetCategory => {
                self.budget = BudgetDraft {
                    category: new,
                    ..self.budget.clone()
                };
            }
            FormField::BudgetAmount => {
                self.budget = BudgetDraft {
                    amount: new,
                    ..self.budget.clone()
                };
            }
            FormField::ExpenseTitle => {
                self.expense = ExpenseDraft {
                    title: new,
                    ..self.expense.clone()
                };
            }
            FormField::ExpenseCategory => {
                self.expense = ExpenseDraft {
                    category: new,
                    ..self.expense.clone()
                };
            }
            FormField::ExpenseAmount => {
                self.expense = ExpenseDraft {
                    amount: new,
                    ..self.expense.clone()
                };
            }
            FormField::ExpenseSpentOn => {
                self.expense = ExpenseDraft {
                    spent_on: new,
                    ..self.expense.clone()
                };
            }
            FormField::ExpenseImageUrl => {
                self.expense = ExpenseDraft {
                    image_url: new,
                    ..self.expense.clone()
                };
            }
            FormField::ExpenseNote => {
                self.expense = ExpenseDraft {
                    note: new,
                    ..self.expense.clone()
                };
            }
            FormField::NoteTitle => {
                self.note = NoteDraft {
                    title: new,
                    ..self.note.clone()
                };
            }
            FormField::NoteContent => {
                self.note = NoteDraft {
                    content: new,
                    ..self.note.clone()
                };
            }
            FormField::ChatText => self.chat = ChatDraft { text: new },
        }
    }
}

/// The five collections, always fetched and replaced together.
#[derive(Debug, Clone)]
pub struct Collections {
    pub summary: Summary,
    pub budgets: Vec<BudgetPlan>,
    pub expenses: Vec<Expense>,
    pub notes: Vec<Note>,
    pub messages: Vec<Message>,
}

/// Fetches all five collections concurrently; the first failure fails the
/// whole load.
pub async fn load_collections(client: &Client) -> Result<Collections, ClientError> {
    let (summary, budgets, expenses, notes, messages) = tokio::try_join!(
        client.summary(),
        client.budgets(),
        client.expenses(),
        client.notes(),
        client.messages(),
    )?;

    Ok(Collections {
        summary,
        budgets,
        expenses,
        notes,
        messages,
    })
}

/// Identifies one reload; only the most recently issued ticket may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct Dashboard {
    pub tab: Tab,
    pub focus: Option<FormField>,
    pub drafts: Drafts,
    pub data: Option<Collections>,
    pub profile: Option<Profile>,
    pub loading: bool,
    pub error: Option<String>,
    pub submitting: Option<DraftKind>,
    latest: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            tab: Tab::Dashboard,
            focus: Tab::Dashboard.fields().first().copied(),
            drafts: Drafts::default(),
            data: None,
            profile: None,
            loading: false,
            error: None,
            submitting: None,
            latest: 0,
        }
    }
}

impl Dashboard {
    /// Drops the working set. The ticket counter keeps counting so loads
    /// started before the reset can never be applied afterwards.
    pub fn reset(&mut self) {
        let latest = self.latest + 1;
        *self = Self {
            latest,
            ..Self::default()
        };
    }

    pub fn begin_reload(&mut self) -> LoadTicket {
        self.latest += 1;
        self.loading = true;
        LoadTicket(self.latest)
    }

    /// Applies a completed load if it is still the latest one. Returns whether
    /// it was applied.
    pub fn apply_reload(
        &mut self,
        ticket: LoadTicket,
        result: Result<Collections, ClientError>,
    ) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "dropping stale load");
            return false;
        }

        self.loading = false;
        match result {
            Ok(collections) => {
                self.data = Some(collections);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("collection reload failed: {err}");
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.focus = tab.fields().first().copied();
    }

    pub fn next_field(&mut self) {
        self.focus = cycle(self.tab.fields(), self.focus, 1);
    }

    pub fn prev_field(&mut self) {
        let fields = self.tab.fields();
        self.focus = cycle(fields, self.focus, fields.len().saturating_sub(1));
    }

    pub fn edit_focused(&mut self, edit: FieldEdit) {
        if let Some(field) = self.focus {
            self.drafts.edit(field, edit);
        }
    }

    /// Snapshot of the draft owning the focused field, if any.
    pub fn focused_draft(&self) -> Option<Draft> {
        self.focus.map(|field| self.drafts.get(field.kind()))
    }

    pub fn start_submit(&mut self, kind: DraftKind) -> Option<Draft> {
        if self.submitting.is_some() {
            return None;
        }
        self.submitting = Some(kind);
        Some(self.drafts.get(kind))
    }

    /// Records a submit outcome. On success only that kind's draft is reset;
    /// the caller must then run a full reload.
    pub fn finish_submit(&mut self, kind: DraftKind, result: &Result<Ack, ClientError>) -> bool {
        self.submitting = None;
        match result {
            Ok(_) => {
                self.drafts.reset(kind);
                true
            }
            Err(err) => {
                tracing::warn!(kind = kind.label(), "submit failed: {err}");
                false
            }
        }
    }
}

fn cycle(fields: &[FormField], current: Option<FormField>, by: usize) -> Option<FormField> {
    if fields.is_empty() {
        return None;
    }
    let idx = current
        .and_then(|field| fields.iter().position(|f| *f == field))
        .unwrap_or(0);
    Some(fields[(idx + by) % fields.len()])
}
