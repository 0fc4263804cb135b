//! Profile page summary.

use heritage_core::Variant;
use heritage_showcase::AppState;

/// Print the profile, quiz statistics and collection counts.
#[allow(clippy::print_stdout)]
pub fn run(state: &AppState) {
    let store = state.user();
    let profile = store.profile();
    let history = &profile.quiz_history;

    println!("{} <{}>", profile.name, profile.email);
    println!("Member since {}", profile.join_date.format("%B %-d, %Y"));
    println!("Language: {}", profile.preferred_language);
    if !profile.interests.is_empty() {
        println!("Interests: {}", profile.interests.join(", "));
    }

    println!();
    println!("Quizzes taken: {}", history.len());
    if let Some(last) = history.last_percent() {
        println!("Average score: {}%", history.average_percent());
        println!("Last score: {last}%");
    }
    for result in history.iter() {
        println!(
            "  {}  {}/{}  {}",
            result.completed_at.format("%Y-%m-%d"),
            result.score,
            result.total_questions,
            result.quiz_name
        );
    }

    println!();
    for variant in Variant::ALL {
        println!(
            "{}: {}",
            variant.label(),
            store.favorite_ids(variant).len()
        );
    }
    println!("Cart items: {}", store.cart_item_count());
}
