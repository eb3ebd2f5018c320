/// Reveals `text` one character at a time.
#[derive(Clone, Debug)]
pub struct Typewriter {
    characters: Vec<char>,
    typed: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            characters: text.chars().collect(),
            typed: 0,
        }
    }

    /// Types the next character and returns the text shown so far, or `None` when the
    /// whole text is already on screen.
    pub fn advance(&mut self) -> Option<String> {
        if self.is_done() {
            return None;
        }

        self.typed += 1;
        Some(self.characters[..self.typed].iter().collect())
    }

    pub fn is_done(&self) -> bool {
        self.typed >= self.characters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_grows_one_character_per_step() {
        let mut typewriter = Typewriter::new("Hé!");

        assert_eq!(typewriter.advance().as_deref(), Some("H"));
        assert_eq!(typewriter.advance().as_deref(), Some("Hé"));
        assert_eq!(typewriter.advance().as_deref(), Some("Hé!"));
        assert!(typewriter.is_done());
        assert_eq!(typewriter.advance(), None);
    }

    #[test]
    fn empty_text_is_done_immediately() {
        let mut typewriter = Typewriter::new("");
        assert!(typewriter.is_done());
        assert_eq!(typewriter.advance(), None);
    }
}
