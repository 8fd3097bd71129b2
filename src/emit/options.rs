//! Emitter options

/// Options for rendering a rule set as Lark grammar text
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Target of the synthetic `start` rule (default: first accepted rule)
    pub start_rule: Option<String>,
    /// Emit the synthetic `start` line at all
    pub emit_start: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            start_rule: None,
            emit_start: true,
        }
    }
}

impl EmitOptions {
    pub fn with_start_rule(mut self, rule: impl Into<String>) -> Self {
        self.start_rule = Some(rule.into());
        self
    }

    pub fn without_start(mut self) -> Self {
        self.emit_start = false;
        self
    }
}
