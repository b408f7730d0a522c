use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use quizforge::engine::scores::{percent_of, ScoreBoard};
use quizforge::quiz::QuizConfig;
use quizforge::surface::{option_label, ResultView};
use quizforge::QfResult;
use std::path::Path;

pub fn print_quiz_summary(quiz: &QuizConfig) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let rows: Vec<(&str, String)> = vec![
        ("Title", quiz.title.clone()),
        ("Subtitle", quiz.subtitle.clone()),
        ("Category", quiz.category.clone()),
        ("Questions", quiz.total_questions().to_string()),
        ("Result types", quiz.results.len().to_string()),
        (
            "Est. minutes",
            quiz.estimated_minutes
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Share URL", quiz.share_url.clone()),
    ];
    for (k, v) in rows {
        table.add_row(vec![Cell::new(k).add_attribute(Attribute::Bold), Cell::new(v)]);
    }
    println!("\n{}", table);

    if let Some(declared) = quiz.question_count {
        if declared != quiz.total_questions() {
            println!(
                "⚠️  questionCount says {} but {} questions are defined.",
                declared,
                quiz.total_questions()
            );
        }
    }
}

pub fn print_type_coverage(quiz: &QuizConfig) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Profile"),
        Cell::new("Options").fg(Color::Cyan),
    ]);
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (kind, count) in quiz.type_coverage() {
        let profile = quiz
            .results
            .get(kind)
            .map(|p| format!("{} {}", p.emoji, p.title))
            .unwrap_or_default();
        let count_cell = if count == 0 {
            Cell::new(count).fg(Color::Red)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![
            Cell::new(kind).add_attribute(Attribute::Bold),
            Cell::new(profile),
            count_cell,
        ]);
    }

    for kind in quiz.undeclared_types() {
        table.add_row(vec![
            Cell::new(kind).fg(Color::Red),
            Cell::new("(undeclared)").fg(Color::Red),
            Cell::new("-"),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_questions(quiz: &QuizConfig) {
    for (i, q) in quiz.questions.iter().enumerate() {
        println!("\n{}. {}", i + 1, q.text);
        for (pos, opt) in q.options.iter().enumerate() {
            let label = option_label(pos).unwrap_or('?');
            println!("   {}) {}  [{}]", label, opt.text, opt.kind);
        }
    }
}

pub fn print_result(result: &ResultView) {
    println!("\n{}", result.label);
    println!("{} {}", result.emoji, result.title);
    println!("{}", result.description);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Type"),
        Cell::new("Score"),
        Cell::new("Match").fg(Color::Cyan),
    ]);
    for i in [0, 2, 3] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, row) in result.breakdown.iter().enumerate() {
        let name = format!(
            "{} {}{}",
            row.emoji,
            row.title,
            if row.is_winner { " ✦" } else { "" }
        );
        let name_cell = if row.is_winner {
            Cell::new(name).fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new(name)
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            name_cell,
            Cell::new(row.score),
            Cell::new(format!("{}%", row.percent)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_scores(board: &ScoreBoard) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Share"),
    ]);
    let total = board.total();
    for (kind, score) in board.iter() {
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(score),
            Cell::new(format!("{}%", percent_of(score, total))),
        ]);
    }
    println!("\n{}", table);
}

pub fn write_scores_csv<P: AsRef<Path>>(path: P, board: &ScoreBoard) -> QfResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["type", "score", "percent"])?;
    let total = board.total();
    for (kind, score) in board.iter() {
        wtr.write_record([
            kind.to_string(),
            score.to_string(),
            percent_of(score, total).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
