//! Six-box one-time-code entry.

use serde::Serialize;

pub const OTP_LEN: usize = 6;
const LAST: usize = OTP_LEN - 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OtpError {
    #[error("'{0}' is not a digit")]
    NotADigit(char),
    #[error("box {0} does not exist")]
    NoSuchBox(usize),
    #[error("Please enter the complete 6-digit code")]
    Incomplete { filled: usize },
}

/// The boxes plus the index of the focused one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpBoxes {
    pub digits: [Option<char>; OTP_LEN],
    pub focus: usize,
}

impl OtpBoxes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `ch` in box `index` and move focus to the next box (or stay on
    /// the last). Anything but an ASCII digit is refused untouched.
    pub fn type_char(&mut self, index: usize, ch: char) -> Result<(), OtpError> {
        if index >= OTP_LEN {
            return Err(OtpError::NoSuchBox(index));
        }
        if !ch.is_ascii_digit() {
            return Err(OtpError::NotADigit(ch));
        }
        self.digits[index] = Some(ch);
        self.focus = (index + 1).min(LAST);
        Ok(())
    }

    /// Backspace in box `index`: clears a filled box in place, or steps
    /// back one box from an empty one.
    pub fn backspace(&mut self, index: usize) -> Result<(), OtpError> {
        if index >= OTP_LEN {
            return Err(OtpError::NoSuchBox(index));
        }
        if self.digits[index].take().is_some() {
            self.focus = index;
        } else {
            self.focus = index.saturating_sub(1);
        }
        Ok(())
    }

    /// Spread the digits of `text` over the boxes from the first one.
    /// Returns false (and changes nothing) if `text` holds no digit.
    pub fn paste(&mut self, text: &str) -> bool {
        let pasted: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(OTP_LEN)
            .collect();
        if pasted.is_empty() {
            return false;
        }
        for (i, slot) in self.digits.iter_mut().enumerate() {
            *slot = pasted.get(i).copied();
        }
        self.focus = pasted.len().min(LAST);
        true
    }

    pub fn filled(&self) -> usize {
        self.digits.iter().filter(|d| d.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == OTP_LEN
    }

    /// The entered code, or `Incomplete` if any box is empty.
    pub fn code(&self) -> Result<String, OtpError> {
        self.digits
            .iter()
            .copied()
            .collect::<Option<String>>()
            .ok_or(OtpError::Incomplete {
                filled: self.filled(),
            })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
