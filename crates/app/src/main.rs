use editor_state::host::HostDocument;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Streams a simulated AI rewrite of a selection into a document and prints
/// the result.
#[derive(Debug, clap::Parser)]
#[command(name = "app", version, about)]
struct Cli {
    /// UTF-8 file to edit. The file on disk is not modified.
    #[arg(long, conflicts_with = "text", required_unless_present = "text")]
    file: Option<std::path::PathBuf>,

    /// Inline document text.
    #[arg(long)]
    text: Option<String>,

    /// Selection start (char offset).
    #[arg(long)]
    from: u64,

    /// Selection end (char offset, exclusive).
    #[arg(long)]
    to: u64,

    /// What to do with the selection, e.g. "double", "title case".
    #[arg(long, env = "AI_EDIT_INSTRUCTION")]
    instruction: Option<String>,

    /// Skip every delay.
    #[arg(long)]
    instant: bool,
}

const IDLE_POLL: std::time::Duration = std::time::Duration::from_millis(25);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,ai_stream=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = <Cli as clap::Parser>::parse();

    // 1. Load the document and select the range.
    let mut document = match (&cli.file, &cli.text) {
        (Some(path), _) => editor_state::document::Document::open(path)?,
        (None, Some(text)) => editor_state::document::Document::from_text(text)?,
        (None, None) => anyhow::bail!("either --file or --text is required"),
    };
    document.select(cli.from, cli.to)?;

    // 2. Build the prompt context and the simulated response.
    let context = editor_state::context::SelectionContext::capture_selection(&document)?;
    tracing::debug!(
        selected = %context.selected_text,
        surrounding = %context.surrounding_context,
        "captured selection"
    );

    let mut config = ai_stream::config::StreamingConfig::from_env();
    let mut source =
        ai_stream::source::SimulatedSource::new(&context.selected_text, cli.instruction.as_deref());

    if cli.instant {
        config = ai_stream::config::StreamingConfig {
            done_display: std::time::Duration::ZERO,
            ..ai_stream::config::StreamingConfig::instant()
        };
        source = source.with_latency(std::time::Duration::ZERO);
    }

    tracing::info!(
        chars = document.len(),
        range = %context.range,
        explanation = source.explanation(),
        "starting ai edit"
    );

    // 3. Run the edit; Ctrl-C cancels it.
    let controller = ai_stream::controller::StreamingEditController::new(document, config);
    controller.on_phase_change(|change| {
        tracing::info!(from = %change.previous, to = %change.current, "phase changed");
    });

    let mut edit = tokio::spawn({
        let controller = controller.clone();
        let range = context.range;
        async move { controller.start_edit(range.from, range.to, source).await }
    });

    let outcome = tokio::select! {
        outcome = &mut edit => outcome?,
        _ = tokio::signal::ctrl_c() => {
            controller.cancel_edit();
            edit.await?
        }
    };

    // 4. Let the finished edit stay on display until the reset.
    if matches!(outcome, ai_stream::controller::EditOutcome::Completed { .. }) {
        let idle = async {
            while controller.phase() != editor_state::ai_edit::AiEditPhase::Idle {
                tokio::time::sleep(IDLE_POLL).await;
            }
        };

        tokio::select! {
            () = idle => {}
            _ = tokio::signal::ctrl_c() => controller.cancel_edit(),
        }
    }

    println!("{}", controller.with_session(|session| session.document().to_string()));

    match outcome {
        ai_stream::controller::EditOutcome::Completed {
            inserted,
            removed_leftover,
        } => {
            tracing::info!(inserted, removed_leftover, "done");
            Ok(())
        }
        ai_stream::controller::EditOutcome::Cancelled { inserted } => {
            tracing::warn!(inserted, "edit cancelled, partial text kept");
            Ok(())
        }
        ai_stream::controller::EditOutcome::Rejected => anyhow::bail!("edit was rejected"),
        ai_stream::controller::EditOutcome::Failed(err) => Err(err.into()),
    }
}
