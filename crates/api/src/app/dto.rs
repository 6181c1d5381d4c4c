use serde::Deserialize;
use serde_json::{Value, json};

use dumroo_ai::{ConversationTurn, QueryResult};
use dumroo_auth::{AdminRole, FilteredView};

/// Body of `POST /ask`. A missing question is treated like a blank one.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

pub fn role_to_json(role: &AdminRole) -> Value {
    json!({
        "label": role.to_string(),
        "kind": role.kind().as_str(),
        "scope": role.scope(),
    })
}

pub fn view_to_json(view: &FilteredView) -> Value {
    json!({
        "role": role_to_json(view.role()),
        "count": view.len(),
        "records": view.records(),
    })
}

pub fn answer_to_json(result: &QueryResult) -> Value {
    json!({
        "answer": result.answer,
        "role": role_to_json(result.view.role()),
        "count": result.view.len(),
        "records": result.view.records(),
    })
}
