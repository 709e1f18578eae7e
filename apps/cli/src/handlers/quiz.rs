//! Interactive review loop over stdin/stdout.
//!
//! Each prompt reads one line. `:exit`/`:quit` stop the session, `:skip`
//! moves on, `:show` reveals the answer and `:stats` prints the counts.
//! End of input stops the session like `:exit`.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vocab_core::{
    Control, FormLabels, Response, ReviewSession, SessionOptions, SessionSummary, StatusCounts,
    Step, Verdict,
};

use super::CommandContext;

pub fn handle_quiz(ctx: &CommandContext, options: SessionOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_quiz(
        ctx,
        &options,
        stdin.lock(),
        stdout.lock(),
        StdRng::from_os_rng(),
    )?;
    Ok(())
}

/// Run one session, reading answers from `input` and writing to `output`.
pub fn run_quiz<I, O, G>(
    ctx: &CommandContext,
    options: &SessionOptions,
    mut input: I,
    mut output: O,
    rng: G,
) -> Result<SessionSummary>
where
    I: BufRead,
    O: Write,
    G: Rng,
{
    let mut items = ctx.load_items()?;
    let mut session = ReviewSession::start(&items, options, ctx.today, rng)?;

    if session.remaining() == 0 {
        writeln!(output, "Nothing to review.")?;
        return Ok(session.summary());
    }
    writeln!(
        output,
        "{} item(s) to review. Type :exit to stop, :skip, :show or :stats.",
        session.remaining()
    )?;

    while let Some(prompt) = session.next_prompt(&items) {
        writeln!(
            output,
            "\nTranslate to {}: {}",
            ctx.labels.target(prompt.direction),
            prompt.text.bold()
        )?;
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        let response = if input.read_line(&mut line)? == 0 {
            Response::Control(Control::Exit)
        } else {
            Response::parse(&line)
        };

        let step = session.respond(&mut items, response, ctx.today, &ctx.store)?;
        if step == Step::Ended {
            break;
        }
        render_step(&mut output, &step, &ctx.labels)?;
    }

    let summary = session.finish(&items, &ctx.store)?;
    tracing::info!(graded = summary.graded, correct = summary.correct, "quiz finished");

    writeln!(
        output,
        "\nSession over: {}/{} correct, {} left.",
        summary.correct, summary.graded, summary.remaining
    )?;
    Ok(summary)
}

fn render_step<O: Write>(output: &mut O, step: &Step, labels: &FormLabels) -> io::Result<()> {
    match step {
        Step::Graded(Verdict {
            correct: true,
            expected,
            item,
            ..
        }) => writeln!(
            output,
            "{} {} (next review in {} day(s))",
            "Correct!".green(),
            expected,
            item.interval
        ),
        Step::Graded(Verdict {
            correct: false,
            expected,
            ..
        }) => writeln!(output, "{} Expected: {}", "Wrong.".red(), expected),
        Step::Revealed { expected } => writeln!(output, "Answer: {expected}"),
        Step::Skipped => writeln!(output, "Skipped."),
        Step::Requeued => writeln!(output, "No answer, asking again later."),
        Step::Progress { counts } => write_counts(output, counts, labels),
        Step::Ended => Ok(()),
    }
}

fn write_counts<O: Write>(output: &mut O, counts: &StatusCounts, labels: &FormLabels) -> io::Result<()> {
    writeln!(
        output,
        "{} / {}: {} new, {} learning, {} validated, {} total",
        labels.form_a, labels.form_b, counts.new, counts.learning, counts.validated, counts.total
    )
}
