use anyhow::{bail, Context};
use clap::Parser;
use pathos_core::{AgentError, Appraisal, Mood, PathosConfig, PersonalityInput, Stimulus};
use pathos_limbic::{Agent, AgentHandle, LoopPhase};
use serde::Serialize;
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "pathos.toml", env = "PATHOS_CONFIG")]
    config: String,

    /// Big Five traits as `o,c,e,a,n`, each in [-1, 1] (overrides the config file)
    #[arg(short, long)]
    personality: Option<String>,

    /// Stimulus to submit: a PAD vector `p,a,d` or an appraisal like `joy=0.8,fear=0.2`.
    /// Repeat to submit several, spaced by --spacing-ms
    #[arg(short, long)]
    stimulus: Vec<String>,

    /// Delay between consecutive stimuli
    #[arg(long, default_value_t = 250)]
    spacing_ms: u64,

    /// How long to run the agent
    #[arg(long, default_value_t = 3.0)]
    seconds: f64,

    /// Sampling period of the printed mood
    #[arg(long, default_value_t = 250)]
    sample_ms: u64,

    /// Print one JSON object per sample instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Sample {
    t_ms: u128,
    phase: LoopPhase,
    mood: Mood,
    label: String,
}

fn parse_floats(raw: &str) -> anyhow::Result<Vec<f32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .with_context(|| format!("`{}` is not a number", s))
        })
        .collect()
}

/// Parse and resolve a `--stimulus` argument into its PAD target.
///
/// Anything that reads as a list of numbers (scientific notation included)
/// is a PAD vector; everything else is an appraisal.
fn parse_stimulus(raw: &str) -> anyhow::Result<Mood> {
    let stimulus = match parse_floats(raw) {
        Ok(values) => Stimulus::Raw(values),
        Err(_) => {
            let appraisal: Appraisal = raw
                .parse()
                .with_context(|| format!("Invalid appraisal `{}`", raw))?;
            Stimulus::Appraisal(appraisal)
        }
    };
    stimulus
        .resolve()
        .with_context(|| format!("Invalid stimulus `{}`", raw))
}

/// Submit `stimuli` one by one, `spacing` apart. Stops at the first one the
/// agent refuses.
async fn feed_stimuli(
    handle: AgentHandle,
    stimuli: Vec<Mood>,
    spacing: Duration,
) -> Result<(), AgentError> {
    for (i, stimulus) in stimuli.into_iter().enumerate() {
        if let Err(e) = handle.submit_stimulus(stimulus) {
            warn!("Stimulus #{} not delivered: {}", i + 1, e);
            return Err(e);
        }
        time::sleep(spacing).await;
    }
    Ok(())
}

fn print_sample(sample: &Sample, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(sample)?);
    } else {
        println!("{:>6} ms  {}  {}", sample.t_ms, sample.mood, sample.label);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let config = PathosConfig::load_or_default(&args.config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        bail!("--seconds must be a non-negative number");
    }
    if args.sample_ms == 0 {
        bail!("--sample-ms must be positive");
    }

    let personality = match &args.personality {
        Some(raw) => PersonalityInput::Raw(
            parse_floats(raw).with_context(|| format!("Invalid personality `{}`", raw))?,
        ),
        None => PersonalityInput::Traits(config.personality.personality()),
    };
    // Validate every stimulus before anything starts running
    let stimuli = args
        .stimulus
        .iter()
        .map(|raw| parse_stimulus(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut agent =
        Agent::new(config.agent.clone(), personality).context("Failed to create agent")?;
    agent.start().context("Failed to start agent loop")?;
    info!(
        "Agent running for {:.1}s with {} stimuli",
        args.seconds,
        stimuli.len()
    );

    let feeder = tokio::spawn(feed_stimuli(
        agent.handle(),
        stimuli,
        Duration::from_millis(args.spacing_ms),
    ));

    let started = Instant::now();
    let total = Duration::from_secs_f64(args.seconds);
    let mut sampler = time::interval(Duration::from_millis(args.sample_ms));
    loop {
        sampler.tick().await;
        let elapsed = started.elapsed();
        if let Some(mood) = agent.latest() {
            let sample = Sample {
                t_ms: elapsed.as_millis(),
                phase: agent.phase(),
                label: mood.describe(),
                mood,
            };
            print_sample(&sample, args.json)?;
        }
        if elapsed >= total {
            break;
        }
    }

    // Stimuli still waiting past the end of the run are dropped
    feeder.abort();
    match feeder.await {
        Ok(Err(e)) => return Err(e).context("Stimulus feed failed"),
        Err(e) if e.is_panic() => bail!("Stimulus feed panicked: {}", e),
        _ => {}
    }
    agent.stop().context("Agent loop exited early")?;
    agent.join().await.context("Agent loop did not shut down cleanly")?;

    if let Some(mood) = agent.latest() {
        info!("Final mood {} ({})", mood, mood.describe());
    }
    Ok(())
}
