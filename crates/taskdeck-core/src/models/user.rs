use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The signed-in user, from `GET /usuario/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UserProfile {
    #[serde(alias = "usuarioId", alias = "userId")]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

/// A search hit when looking for someone to invite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UserSummary {
    #[serde(alias = "usuarioId", alias = "userId")]
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_with_extra_fields() {
        let json = r#"{"id":7,"username":"ana","email":"ana@example.com","nombre":"Ana","activo":true}"#;
        let me: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(me.id, Some(7));
        assert_eq!(me.display_name(), "ana");
        assert_eq!(me.extra.get("nombre").and_then(|v| v.as_str()), Some("Ana"));
    }

    #[test]
    fn test_search_hit_aliases() {
        let hits: Vec<UserSummary> =
            serde_json::from_str(r#"[{"usuarioId":3,"username":"luis"},{"id":4,"email":"m@x.io"}]"#).unwrap();
        assert_eq!(hits[0].id, 3);
        assert_eq!(hits[1].email.as_deref(), Some("m@x.io"));
    }
}
