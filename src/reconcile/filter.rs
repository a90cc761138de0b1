use crate::model::session::SessionRecord;

/// Case-insensitive search over employee names and codes.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    needle: String,
}

impl SessionFilter {
    pub fn new(search: Option<&str>) -> Self {
        Self {
            needle: search.unwrap_or_default().trim().to_lowercase(),
        }
    }

    pub fn matches(&self, session: &SessionRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let name = &session.employee_name;
        let code = session.employee_code.as_deref().unwrap_or_default();
        let full_name = name.display();

        [
            name.first_name.as_str(),
            name.last_name.as_str(),
            full_name.as_str(),
            code,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.needle))
    }

    pub fn apply(&self, sessions: Vec<SessionRecord>) -> Vec<SessionRecord> {
        sessions.into_iter().filter(|s| self.matches(s)).collect()
    }
}
