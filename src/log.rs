use chrono::Local;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub method: String,
    pub url: String,
    // None when the request never produced a response.
    pub status: Option<u16>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct RequestLog {
    entries: Vec<LogEntry>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, method: &str, url: &str, status: Option<u16>, body: Option<Value>) {
        self.entries.push(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            method: method.to_string(),
            url: url.to_string(),
            status,
            body,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let status = match entry.status {
                Some(code) => code.to_string(),
                None => "ERROR".to_string(),
            };
            out.push_str(&format!(
                "[{}] {} {} - {}\n",
                entry.timestamp, entry.method, entry.url, status
            ));
            if let Some(body) = &entry.body {
                let pretty =
                    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
                out.push_str(&pretty);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_appends_in_order() {
        let mut log = RequestLog::new();
        log.record("GET", "/tasks", Some(200), None);
        log.record("POST", "/tasks", Some(201), Some(json!({"id": 1})));
        log.record("GET", "/tasks", None, Some(json!({"error": "connection refused"})));

        let methods: Vec<&str> = log.entries().iter().map(|e| e.method.as_str()).collect();
        assert_eq!(methods, vec!["GET", "POST", "GET"]);
        assert_eq!(log.entries()[2].status, None);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = RequestLog::new();
        log.record("DELETE", "/tasks/3", Some(200), None);
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.render_text(), "");
    }

    #[test]
    fn render_text_marks_missing_status_as_error() {
        let mut log = RequestLog::new();
        log.record("GET", "http://localhost/api/tasks", None, None);
        let text = log.render_text();
        assert!(text.contains("GET http://localhost/api/tasks - ERROR"));
    }

    #[test]
    fn render_text_pretty_prints_payloads() {
        let mut log = RequestLog::new();
        log.record("GET", "/tasks", Some(200), Some(json!({"success": true, "count": 0})));
        let text = log.render_text();
        assert!(text.contains("- 200"));
        assert!(text.contains("\"success\": true"));
    }
}
