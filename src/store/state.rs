use serde::Serialize;

use super::{AlertState, OptionGroupState};
use crate::data::SavedSurvey;
use crate::model::Survey;

/// Question-creation modal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ModalState {
    pub is_open: bool,
    /// Id of the item something was last dropped on
    pub drop_target_id: Option<String>,
}

/// Aggregate state delivered to observers after every dispatch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppState {
    pub survey: Survey,
    pub modal: ModalState,
    pub alert: AlertState,
    pub option_groups: OptionGroupState,
    pub load_modal_visible: bool,
    pub saved_surveys: Vec<SavedSurvey>,
    /// Item the view should bring into focus
    pub focused_item: Option<String>,
}
