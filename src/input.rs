/// Single-line text box. Holds raw text; parsing happens in the state machines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub placeholder: &'static str,
}

impl TextInput {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            text: String::new(),
            placeholder,
        }
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Integer spin box constrained to `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinBox {
    value: u32,
    min: u32,
    max: u32,
}

impl SpinBox {
    pub fn new(value: u32, min: u32, max: u32) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value = (self.value + 1).min(self.max);
    }

    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1).max(self.min);
    }

    /// Append a typed digit, keeping the value inside the range.
    /// A digit that would overflow the range starts a fresh number.
    pub fn push_digit(&mut self, digit: u32) {
        let appended = self.value.saturating_mul(10).saturating_add(digit);
        self.value = if appended <= self.max {
            appended
        } else {
            digit.clamp(self.min, self.max)
        };
    }

    pub fn backspace(&mut self) {
        self.value = (self.value / 10).max(self.min);
    }
}
