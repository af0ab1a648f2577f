//! The survey store: applies intents to the document and view state.
//!
//! Each handler builds the next values from the current ones and commits them
//! only once every step succeeded, so a failing intent leaves no trace apart
//! from the alert describing the failure.

use crate::config::{Config, ConfigError};
use crate::data::{KeyValueStore, MemoryStore, SavedSurvey, SavedSurveyStore};
use crate::error::StoreError;
use crate::model::{
    copy_block, copy_question, AnswerOption, Block, BlockId, IdGenerator, ItemType, OptionId,
    Question, QuestionId, Survey,
};

use super::{
    AlertLevel, AppState, Effect, History, Intent, Observers, OptionGroupState, QuestionDraft,
    SubscriptionId,
};

/// Central state container for the editor
pub struct SurveyStore {
    config: Config,
    state: AppState,
    history: History,
    ids: IdGenerator,
    /// Survey installed on load and clear
    initial: Survey,
    /// Option texts entered so far, in first-use order
    option_suggestions: Vec<String>,
    saved: SavedSurveyStore,
    observers: Observers,
    effects: Vec<Effect>,
}

impl SurveyStore {
    /// Create a store, reading the initial survey the config points at
    pub fn new(config: Config, storage: Box<dyn KeyValueStore>) -> Result<Self, ConfigError> {
        let initial = config.initial_survey()?;
        Ok(Self::with_initial_survey(config, storage, initial))
    }

    pub fn with_initial_survey(
        config: Config,
        storage: Box<dyn KeyValueStore>,
        initial: Survey,
    ) -> Self {
        let mut ids = IdGenerator::new();
        ids.observe(&initial);

        let state = AppState {
            option_groups: OptionGroupState::from_defaults(&config.option_groups),
            ..AppState::default()
        };

        Self {
            history: History::with_limit(config.history_limit),
            saved: SavedSurveyStore::new(storage, config.storage_key.clone()),
            config,
            state,
            ids,
            initial,
            option_suggestions: Vec::new(),
            observers: Observers::default(),
            effects: Vec::new(),
        }
    }

    /// Store with default config backed by process memory
    pub fn in_memory() -> Self {
        Self::with_initial_survey(Config::default(), Box::new(MemoryStore::new()), Survey::new())
    }

    // ========== Queries ==========

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn survey(&self) -> &Survey {
        &self.state.survey
    }

    /// Current document as plain JSON
    pub fn survey_json(&self) -> serde_json::Value {
        self.state.survey.to_json()
    }

    /// Id of the block that holds the question
    pub fn block_id_of_question(&self, question_id: &QuestionId) -> Result<BlockId, StoreError> {
        Ok(self.state.survey.block_of_question(question_id)?.id.clone())
    }

    /// Distinct option texts entered since the last load or clear
    pub fn option_suggestions(&self) -> &[String] {
        &self.option_suggestions
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========== Observers ==========

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&AppState) + Send + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ========== Effects ==========

    /// Take the effects queued by earlier dispatches
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Hide the alert if `generation` is still the shown one.
    ///
    /// Returns true when the alert was hidden.
    pub fn expire_alert(&mut self, generation: u64) -> bool {
        if !self.state.alert.hide_if_current(generation) {
            tracing::trace!(generation, "Ignoring stale alert expiry");
            return false;
        }
        self.observers.notify(&self.state);
        true
    }

    // ========== Dispatch ==========

    /// Apply one intent, then notify observers.
    ///
    /// Failures are also shown as an alert; the returned error is for callers
    /// that want to inspect it.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), StoreError> {
        let name = intent.name();
        tracing::debug!(intent = name, "Dispatching intent");

        let result = self.apply(intent);
        if let Err(err) = &result {
            let level = if err.is_fatal() {
                tracing::error!(intent = name, error = %err, "Intent failed");
                AlertLevel::Error
            } else {
                tracing::warn!(intent = name, error = %err, "Intent rejected");
                AlertLevel::Warning
            };
            self.show_alert(err.to_string(), level);
        }

        self.observers.notify(&self.state);
        result
    }

    fn apply(&mut self, intent: Intent) -> Result<(), StoreError> {
        match intent {
            Intent::Load => self.load(),
            Intent::Clear => self.clear(),
            Intent::UndoSurvey => self.undo(),
            Intent::BlockDropped { target_id } => self.block_dropped(target_id),
            Intent::QuestionDropped { question } => self.question_dropped(question),
            Intent::OptionAdded { question_id, text } => self.option_added(&question_id, text),
            Intent::OptionGroupDropped { question_id } => self.option_group_dropped(&question_id),
            Intent::ToggleParam {
                item_type,
                item_id,
                property,
            } => self.toggle_param(item_type.resolve("toggle")?, &item_id, &property),
            Intent::ItemCopy { item_type, item_id } => {
                self.item_copy(item_type.resolve("copy")?, &item_id)
            }
            Intent::ItemDelete { item_type, item_id } => {
                self.item_delete(item_type.resolve("delete")?, &item_id)
            }
            Intent::SaveEditText { text, question_id } => self.save_edit_text(&question_id, text),
            Intent::SaveFreeText { text, question_id } => self.save_free_text(&question_id, &text),
            Intent::MoveQuestion {
                question_id,
                block_id,
            } => self.move_question(&question_id, &block_id),
            Intent::ReorderItem { item_type, .. } => match item_type.resolve("reorder")? {
                ItemType::Block | ItemType::Question => Err(StoreError::NotImplemented("reorder")),
                kind @ ItemType::Option => Err(StoreError::invalid_item_type(kind, "reorder")),
            },
            Intent::SaveSurvey { title } => self.save_survey(title),
            Intent::LoadSurvey { data } => self.load_survey(data),
            Intent::ToggleModal {
                item_type,
                drop_target_id,
            } => {
                if item_type.resolve("toggle modal")? == ItemType::Question {
                    self.state.modal.is_open = !self.state.modal.is_open;
                }
                self.state.modal.drop_target_id = drop_target_id;
                Ok(())
            }
            Intent::ToggleLoadModal => {
                self.state.load_modal_visible = !self.state.load_modal_visible;
                Ok(())
            }
            Intent::ShowAlert { message, level } => {
                self.show_alert(message, level);
                Ok(())
            }
            Intent::ScrollToItem { id } => {
                self.state.focused_item = Some(id);
                Ok(())
            }
            Intent::UpdateOptionGroupSelection { id } => self.state.option_groups.select(id),
            Intent::AddOptionGroup { labels } => {
                let id = self.state.option_groups.add(labels);
                tracing::debug!(group_id = id, "Option group added");
                Ok(())
            }
        }
    }

    /// Install a new document, recording the current one for undo if asked
    fn commit(&mut self, survey: Survey, record: bool) {
        let previous = std::mem::replace(&mut self.state.survey, survey);
        if record {
            self.history.push(previous);
        }
    }

    fn show_alert(&mut self, message: impl Into<String>, level: AlertLevel) {
        let generation = self.state.alert.show(message, level);
        // A newer hide supersedes any still queued
        self.effects
            .retain(|effect| !matches!(effect, Effect::ScheduleAlertHide { .. }));
        self.effects.push(Effect::ScheduleAlertHide {
            generation,
            after: self.config.alert_timeout,
        });
    }

    fn remember_option_text(&mut self, text: &str) {
        if !self.option_suggestions.iter().any(|t| t == text) {
            self.option_suggestions.push(text.to_string());
        }
    }

    // ========== Session ==========

    fn load(&mut self) -> Result<(), StoreError> {
        let saved_surveys = self.saved.list()?;
        let survey = Survey::from_template(&self.initial);

        self.state.option_groups = OptionGroupState::from_defaults(&self.config.option_groups);
        self.state.saved_surveys = saved_surveys;
        self.option_suggestions.clear();
        self.ids.observe(&survey);
        self.commit(survey, true);

        tracing::info!(
            saved = self.state.saved_surveys.len(),
            "Editor state loaded"
        );
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let survey = Survey::from_template(&self.initial);
        self.ids.observe(&survey);
        self.commit(survey, true);
        self.option_suggestions.clear();
        self.show_alert("New survey created", AlertLevel::Success);
        Ok(())
    }

    fn undo(&mut self) -> Result<(), StoreError> {
        let previous = self.history.pop()?;
        self.state.alert.hide();
        self.state.survey = previous;
        tracing::debug!(remaining = self.history.len(), "Undo applied");
        Ok(())
    }

    // ========== Structure ==========

    fn block_dropped(&mut self, target_id: Option<BlockId>) -> Result<(), StoreError> {
        let mut ids = self.ids.clone();
        let block = Block::new(ids.block_id());
        let block_id = block.id.clone();
        let next = self.state.survey.add_block(block, target_id.as_ref())?;

        self.ids = ids;
        self.commit(next, true);

        tracing::info!(block_id = %block_id, parent = ?target_id, "Block added");
        let message = match target_id {
            None => "New block added.",
            Some(_) => "New subblock added.",
        };
        self.show_alert(message, AlertLevel::Success);
        Ok(())
    }

    fn question_dropped(&mut self, draft: QuestionDraft) -> Result<(), StoreError> {
        let mut ids = self.ids.clone();
        let question = Question::with_flags(ids.question_id(), draft.text, draft.flags);
        let question_id = question.id.clone();
        let next = self.state.survey.add_question(question, &draft.parent_id)?;

        self.ids = ids;
        self.commit(next, true);

        tracing::info!(question_id = %question_id, block_id = %draft.parent_id, "Question added");
        self.show_alert("New Question added.", AlertLevel::Success);
        Ok(())
    }

    fn option_added(&mut self, question_id: &QuestionId, text: String) -> Result<(), StoreError> {
        let mut ids = self.ids.clone();
        let option = AnswerOption::new(ids.option_id(), text.clone());
        let next = self.state.survey.add_option(option, question_id)?;

        self.ids = ids;
        self.commit(next, true);
        self.remember_option_text(&text);
        Ok(())
    }

    fn option_group_dropped(&mut self, question_id: &QuestionId) -> Result<(), StoreError> {
        let labels = self
            .state
            .option_groups
            .selected()
            .map(|group| group.labels.clone())
            .ok_or_else(|| StoreError::NotFound {
                kind: "option group",
                id: self.state.option_groups.selected_id.to_string(),
            })?;

        let mut ids = self.ids.clone();
        let mut next = self.state.survey.clone();
        for label in &labels {
            next = next.add_option(AnswerOption::new(ids.option_id(), label.clone()), question_id)?;
        }

        self.ids = ids;
        self.commit(next, true);
        for label in &labels {
            self.remember_option_text(label);
        }
        tracing::info!(question_id = %question_id, count = labels.len(), "Option group applied");
        Ok(())
    }

    fn toggle_param(
        &mut self,
        item_type: ItemType,
        item_id: &str,
        property: &str,
    ) -> Result<(), StoreError> {
        let survey = &self.state.survey;
        let next = match item_type {
            ItemType::Block => {
                let mut block = copy_block(survey.block(&BlockId::from(item_id))?);
                if !block.toggle(property) {
                    tracing::debug!(item_id, property, "Unknown block property");
                    return Ok(());
                }
                survey.replace_block(block)?
            }
            ItemType::Question => {
                let mut question = copy_question(survey.question(&QuestionId::from(item_id))?);
                if !question.toggle(property) {
                    tracing::debug!(item_id, property, "Unknown question property");
                    return Ok(());
                }
                survey.replace_question(question)?
            }
            ItemType::Option => return Err(StoreError::invalid_item_type(item_type, "toggle")),
        };

        self.commit(next, true);
        Ok(())
    }

    fn item_copy(&mut self, item_type: ItemType, item_id: &str) -> Result<(), StoreError> {
        let mut ids = self.ids.clone();
        let survey = &self.state.survey;
        let (next, new_id, message) = match item_type {
            ItemType::Block => {
                let original = BlockId::from(item_id);
                let copy = survey.block(&original)?.duplicate(&mut ids);
                let new_id = copy.id.to_string();
                (survey.insert_block_after(copy, &original)?, new_id, "Block copied.")
            }
            ItemType::Question => {
                let original = QuestionId::from(item_id);
                let copy = survey.question(&original)?.duplicate(&mut ids);
                let new_id = copy.id.to_string();
                (
                    survey.insert_question_after(copy, &original)?,
                    new_id,
                    "Question copied.",
                )
            }
            ItemType::Option => return Err(StoreError::invalid_item_type(item_type, "copy")),
        };

        self.ids = ids;
        self.commit(next, false);
        tracing::info!(item_type = %item_type, source = item_id, copy = %new_id, "Item copied");
        self.show_alert(message, AlertLevel::Info);
        self.state.focused_item = Some(new_id);
        Ok(())
    }

    fn item_delete(&mut self, item_type: ItemType, item_id: &str) -> Result<(), StoreError> {
        let survey = &self.state.survey;
        let (next, message) = match item_type {
            ItemType::Block => (
                survey.remove_block(&BlockId::from(item_id))?,
                "Block deleted successfully.",
            ),
            ItemType::Question => (
                survey.remove_question(&QuestionId::from(item_id))?,
                "Question deleted successfully.",
            ),
            ItemType::Option => (
                survey.remove_option(&OptionId::from(item_id))?,
                "Options deleted successfully.",
            ),
        };

        self.commit(next, true);
        tracing::info!(item_type = %item_type, item_id, "Item deleted");
        self.show_alert(message, AlertLevel::Success);
        Ok(())
    }

    fn save_edit_text(&mut self, question_id: &QuestionId, text: String) -> Result<(), StoreError> {
        let mut question = copy_question(self.state.survey.question(question_id)?);
        question.text = text;
        let next = self.state.survey.replace_question(question)?;
        self.commit(next, true);
        Ok(())
    }

    fn save_free_text(&mut self, question_id: &QuestionId, text: &str) -> Result<(), StoreError> {
        let mut question = copy_question(self.state.survey.question(question_id)?);
        question.set_free_text(text)?;
        let next = self.state.survey.replace_question(question)?;
        self.commit(next, true);
        Ok(())
    }

    fn move_question(
        &mut self,
        question_id: &QuestionId,
        block_id: &BlockId,
    ) -> Result<(), StoreError> {
        let survey = &self.state.survey;
        let current = survey.block_of_question(question_id)?.id.clone();
        survey.block(block_id)?;
        if current == *block_id {
            return Ok(());
        }

        let question = copy_question(survey.question(question_id)?);
        let next = survey
            .remove_question(question_id)?
            .add_question(question, block_id)?;

        self.commit(next, true);
        tracing::info!(question_id = %question_id, from = %current, to = %block_id, "Question moved");
        self.show_alert("Question moved.", AlertLevel::Success);
        Ok(())
    }

    // ========== Persistence ==========

    fn save_survey(&mut self, title: String) -> Result<(), StoreError> {
        let entry = SavedSurvey::new(title, &self.state.survey);
        self.state.saved_surveys = self.saved.append(entry)?;
        self.show_alert("Survey saved!", AlertLevel::Info);
        Ok(())
    }

    fn load_survey(&mut self, data: serde_json::Value) -> Result<(), StoreError> {
        let survey = Survey::from_json(data)?;
        self.ids.observe(&survey);
        self.commit(survey, true);
        self.show_alert("Survey loaded.", AlertLevel::Success);
        Ok(())
    }
}

impl std::fmt::Debug for SurveyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyStore")
            .field("survey", &self.state.survey.id)
            .field("history", &self.history.len())
            .field("observers", &self.observers)
            .finish()
    }
}
