use cozy_chess::Square;

/// Buffer for typed square names ("e2", "e4").
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    buffer: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a file letter first, then a rank digit. Anything else is
    /// dropped.
    pub fn push_char(&mut self, c: char) {
        let c = c.to_ascii_lowercase();
        let accepted = match self.buffer.len() {
            0 => ('a'..='h').contains(&c),
            1 => ('1'..='8').contains(&c),
            _ => false,
        };
        if accepted {
            self.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The completed square, consuming the buffer.
    pub fn take_square(&mut self) -> Option<Square> {
        let square = chess::parse_square(&self.buffer)?;
        self.buffer.clear();
        Some(square)
    }
}
