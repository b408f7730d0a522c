use crate::reports;
use clap::Args;
use quizforge::config::LoadPolicy;
use quizforge::quiz::{loader, QuizConfig};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Also list every question with its options.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Prints the quiz audit. Returns false when the quiz would be rejected.
pub fn run(args: &ValidateArgs, quiz: &QuizConfig, policy: LoadPolicy) -> bool {
    println!("\n🔎 === QUIZ AUDIT === 🔎");
    reports::print_quiz_summary(quiz);
    reports::print_type_coverage(quiz);
    if args.verbose {
        reports::print_questions(quiz);
    }

    let problems = loader::problems(quiz, policy);
    if problems.is_empty() {
        println!("\n✅ No problems found ({:?} policy).", policy);
        return true;
    }

    println!("\n❌ {} problem(s) ({:?} policy):", problems.len(), policy);
    for p in &problems {
        println!("   - {}", p);
    }
    false
}
