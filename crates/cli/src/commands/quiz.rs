//! Take the bundled quiz non-interactively.
//!
//! # Usage
//!
//! ```bash
//! heritage quiz --answers 0,2,0,2,1
//! ```

use heritage_showcase::AppState;
use heritage_showcase::quiz::QuizPhase;
use tracing::info;

use super::CommandError;

/// Play every question with the given answers and record the result.
///
/// # Errors
///
/// Returns an error if the number of answers does not match the quiz, or an
/// answer is not one of its question's options.
#[allow(clippy::print_stdout)]
pub fn run(state: &AppState, answers: &[usize]) -> Result<(), CommandError> {
    let store = state.user();
    let mut session = state.quiz_session();

    let questions = session.quiz().questions.len();
    if answers.len() != questions {
        return Err(CommandError::InvalidArgument(format!(
            "expected {questions} answers, got {}",
            answers.len()
        )));
    }

    info!(quiz = %session.quiz().name, questions, "Starting quiz");
    session.start()?;

    for (number, &answer) in answers.iter().enumerate() {
        let Some(question) = session.current_question().cloned() else {
            break;
        };
        let outcome = session.select_answer(answer)?;

        println!("{}. {}", number + 1, question.prompt);
        let chosen = question.options.get(answer).map_or("?", String::as_str);
        if outcome.correct {
            println!("   {chosen}: correct");
        } else {
            let right = question
                .options
                .get(outcome.correct_answer)
                .map_or("?", String::as_str);
            println!("   {chosen}: wrong, the answer is {right}");
        }
        println!("   {}", outcome.explanation);

        session.advance(store)?;
    }

    if let QuizPhase::Completed { score, total } = session.phase() {
        let percent = store.quiz_history().last_percent().unwrap_or(0);
        let verdict = session.verdict().map_or("", |v| v.message());
        println!();
        println!("Score: {score}/{total} ({percent}%) {verdict}");
        println!();
        println!("Recent results:");
        for result in store.quiz_history().iter() {
            println!(
                "  {}  {}  {}/{}",
                result.completed_at.format("%Y-%m-%d %H:%M"),
                result.quiz_name,
                result.score,
                result.total_questions
            );
        }
    }

    Ok(())
}
