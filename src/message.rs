use serde::{Deserialize, Serialize};

use crate::color::Color;

/// One row of computed colours, addressed by its y-coordinate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowUpdate {
    pub row: u32,
    pub computed_colours: Vec<Color>,
}

/// Messages the compute collaborator sends, one JSON object per line.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inbound {
    InitialSettings { width: u32, height: u32 },
    Row(RowUpdate),
    Rows { rows: Vec<RowUpdate> },
}

/// Replies sent back to the collaborator.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Outbound {
    /// The frame is allocated and rows may start streaming.
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_initial_settings() {
        let message: Inbound =
            serde_json::from_str(r#"{"type":"initialSettings","width":400,"height":400}"#)
                .unwrap();
        match message {
            Inbound::InitialSettings { width, height } => {
                assert_eq!(width, 400);
                assert_eq!(height, 400);
            }
            other => panic!("decoded wrong variant: {:?}", other),
        }
    }

    #[test]
    fn decodes_row_with_collaborator_field_names() {
        let message: Inbound = serde_json::from_str(
            r#"{
                "type": "row",
                "row": 7,
                "computedColours": [
                    {"red": 1.0, "green": 0.0, "blue": 0.0, "alpha": 1.0},
                    {"red": 0.0, "green": 0.5, "blue": 0.0, "alpha": 1.0}
                ]
            }"#,
        )
        .unwrap();
        match message {
            Inbound::Row(update) => {
                assert_eq!(update.row, 7);
                assert_eq!(update.computed_colours.len(), 2);
                assert_eq!(update.computed_colours[1].green, 0.5);
            }
            other => panic!("decoded wrong variant: {:?}", other),
        }
    }

    #[test]
    fn decodes_row_batch() {
        let message: Inbound = serde_json::from_str(
            r#"{
                "type": "rows",
                "rows": [
                    {"row": 0, "computedColours": []},
                    {"row": 1, "computedColours": []}
                ]
            }"#,
        )
        .unwrap();
        match message {
            Inbound::Rows { rows } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1].row, 1);
            }
            other => panic!("decoded wrong variant: {:?}", other),
        }
    }

    #[test]
    fn encodes_ready_reply() {
        let line = serde_json::to_string(&Outbound::Ready).unwrap();
        assert_eq!(line, r#"{"type":"ready"}"#);
    }
}
