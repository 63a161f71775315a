use crate::domain::values::emotion::Emotion;
use crate::domain::values::record_id::RecordId;
use crate::domain::values::visibility::Visibility;
use serde::Serialize;

/// What the dashboard is showing on top of the card grid. At most one of the
/// entry form or the detail overlay is open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    FormOpen {
        emotion: Emotion,
        /// `Some` when editing an existing record, `None` when creating.
        editing_id: Option<RecordId>,
    },
    OverlayOpen {
        id: RecordId,
        visibility: Visibility,
    },
}

impl ViewState {
    pub fn is_form_open(&self) -> bool {
        matches!(self, ViewState::FormOpen { .. })
    }

    pub fn is_overlay_open(&self) -> bool {
        matches!(self, ViewState::OverlayOpen { .. })
    }
}
