use colored::*;

use crate::workspace::{Card, SaveState, EMPTY_HISTORY_NOTICE};

const CARD_RULE: &str = "────────────────────────────────────────";

/// Render one card as terminal text
pub fn render_card(index: usize, card: &Card) -> String {
    match card {
        Card::Idea { text, save_state } => {
            let badge = match save_state {
                SaveState::Unsaved => "💾 Unsaved".bright_magenta().to_string(),
                SaveState::Saved => "👍 Saved".green().to_string(),
            };
            format!(
                "{} {}\n{}\n{}",
                format!("Idea {}", index + 1).magenta().bold(),
                badge,
                text,
                CARD_RULE.dimmed()
            )
        }
        Card::Notice { message } => format!("{}\n{}", message.yellow(), CARD_RULE.dimmed()),
    }
}

/// Print the cards of an output container
pub fn print_cards(title: &str, cards: &[Card]) {
    println!("{}", title.bold().underline());
    let mut ideas = 0;
    for card in cards {
        let index = ideas;
        if matches!(card, Card::Idea { .. }) {
            ideas += 1;
        }
        println!("{}", render_card(index, card));
    }
}

/// Print the history page
pub fn print_history(ideas: &[String]) {
    println!("{}", "Saved ideas".bold().underline());
    if ideas.is_empty() {
        println!("{}", EMPTY_HISTORY_NOTICE.yellow());
        return;
    }
    for (i, idea) in ideas.iter().enumerate() {
        println!("{}\n{}\n{}", format!("[{}]", i + 1).cyan().bold(), idea, CARD_RULE.dimmed());
    }
    println!(
        "{}",
        "Remove an idea with `lavender history remove <N>`.".dimmed()
    );
}
