/// Typewriter dialogue box. States cycle Hidden -> Revealing -> FullyShown
/// -> Hidden; there is no queue and a running reveal cannot be replaced.
#[derive(Debug, Clone, PartialEq)]
struct DialogueController {
    state: DialogueState,
    reveal_elapsed_seconds: f32,
}

impl DialogueController {
    fn new() -> Self {
        Self {
            state: DialogueState::Hidden,
            reveal_elapsed_seconds: 0.0,
        }
    }

    fn state(&self) -> &DialogueState {
        &self.state
    }

    fn is_active(&self) -> bool {
        !matches!(self.state, DialogueState::Hidden)
    }

    fn reveal(&mut self, text: &str) {
        if !matches!(self.state, DialogueState::Hidden) {
            return;
        }
        self.reveal_elapsed_seconds = 0.0;
        self.state = DialogueState::Revealing {
            shown_chars: 0,
            text: text.to_string(),
        };
    }

    /// One character becomes visible per `CHAR_REVEAL_SECONDS` of
    /// accumulated tick time; once every character is visible the state
    /// moves to FullyShown on its own.
    fn tick(&mut self, dt: f32) {
        let DialogueState::Revealing { shown_chars, text } = &mut self.state else {
            return;
        };
        let total_chars = text.chars().count();
        self.reveal_elapsed_seconds += dt;
        while self.reveal_elapsed_seconds >= CHAR_REVEAL_SECONDS && *shown_chars < total_chars {
            self.reveal_elapsed_seconds -= CHAR_REVEAL_SECONDS;
            *shown_chars += 1;
        }
        if *shown_chars >= total_chars {
            let text = std::mem::take(text);
            self.reveal_elapsed_seconds = 0.0;
            self.state = DialogueState::FullyShown { text };
        }
    }

    fn advance_or_dismiss(&mut self) {
        match &mut self.state {
            DialogueState::Hidden => {}
            DialogueState::Revealing { text, .. } => {
                let text = std::mem::take(text);
                self.reveal_elapsed_seconds = 0.0;
                self.state = DialogueState::FullyShown { text };
            }
            DialogueState::FullyShown { .. } => {
                self.state = DialogueState::Hidden;
            }
        }
    }

    fn visible_text(&self) -> Option<&str> {
        match &self.state {
            DialogueState::Hidden => None,
            DialogueState::Revealing { shown_chars, text } => {
                Some(prefix_chars(text, *shown_chars))
            }
            DialogueState::FullyShown { text } => Some(text),
        }
    }
}

/// Prefix of `text` that is `count` characters long. Counting is by char,
/// not byte; dialogue messages are routinely non-ASCII.
fn prefix_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod dialogue_tests {
    use super::*;

    #[test]
    fn reveal_completes_in_one_tick_per_character() {
        let mut dialogue = DialogueController::new();
        dialogue.reveal("ようこそ");
        assert_eq!(dialogue.visible_text(), Some(""));

        for shown in 1..=4usize {
            dialogue.tick(CHAR_REVEAL_SECONDS);
            assert_eq!(
                dialogue.visible_text().map(|text| text.chars().count()),
                Some(shown)
            );
            if shown < 4 {
                assert!(matches!(
                    dialogue.state(),
                    DialogueState::Revealing { .. }
                ));
            }
        }
        assert_eq!(
            dialogue.state(),
            &DialogueState::FullyShown {
                text: "ようこそ".to_string()
            }
        );
    }

    #[test]
    fn advance_while_revealing_shows_the_full_text_at_once() {
        let mut dialogue = DialogueController::new();
        dialogue.reveal("hello there");
        dialogue.tick(CHAR_REVEAL_SECONDS);
        dialogue.advance_or_dismiss();
        assert_eq!(
            dialogue.state(),
            &DialogueState::FullyShown {
                text: "hello there".to_string()
            }
        );
        assert_eq!(dialogue.visible_text(), Some("hello there"));
    }

    #[test]
    fn dismiss_from_fully_shown_clears_the_text() {
        let mut dialogue = DialogueController::new();
        dialogue.reveal("bye");
        dialogue.advance_or_dismiss();
        dialogue.advance_or_dismiss();
        assert_eq!(dialogue.state(), &DialogueState::Hidden);
        assert_eq!(dialogue.visible_text(), None);
    }

    #[test]
    fn reveal_during_an_active_dialogue_is_ignored() {
        let mut dialogue = DialogueController::new();
        dialogue.reveal("first");
        dialogue.reveal("second");
        dialogue.advance_or_dismiss();
        assert_eq!(dialogue.visible_text(), Some("first"));
    }

    #[test]
    fn dismiss_with_no_dialogue_is_a_no_op() {
        let mut dialogue = DialogueController::new();
        dialogue.advance_or_dismiss();
        assert_eq!(dialogue.state(), &DialogueState::Hidden);
    }

    #[test]
    fn empty_text_reveals_to_fully_shown_on_the_next_tick() {
        let mut dialogue = DialogueController::new();
        dialogue.reveal("");
        assert!(matches!(dialogue.state(), DialogueState::Revealing { .. }));
        dialogue.tick(CHAR_REVEAL_SECONDS);
        assert_eq!(
            dialogue.state(),
            &DialogueState::FullyShown {
                text: String::new()
            }
        );
    }

    #[test]
    fn a_fast_tick_reveals_several_characters() {
        let mut dialogue = DialogueController::new();
        dialogue.reveal("abcdef");
        dialogue.tick(CHAR_REVEAL_SECONDS * 3.5);
        assert_eq!(
            dialogue.visible_text().map(str::len),
            Some(3)
        );
    }
}
