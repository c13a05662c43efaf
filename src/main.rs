//! Replay binary: feeds item files to one chart and writes the live
//! geometry of every frame to stdout as JSON lines.

use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use motion_charts::geometry::{Breadcrumb, Segment, Tick};
use motion_charts::item::load_items;
use motion_charts::{BubbleChart, Chart, Options, PieChart, SegmentedBarChart};
use serde::Serialize;
use web_time::{Duration, Instant};

/// Frames after which a replay is cut off even if the chart still animates.
const MAX_FRAMES: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartKind {
    Bubble,
    Pie,
    Bars,
}

/// Replay chart transitions frame by frame.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON item list shown first.
    data: Option<PathBuf>,

    /// JSON item list transitioned to once the first one has settled.
    #[arg(long)]
    then: Option<PathBuf>,

    /// Chart to drive.
    #[arg(long, value_enum, default_value = "bubble")]
    chart: ChartKind,

    /// TOML options preset.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Slash-separated caption path to drill into after the first data
    /// settles (bar chart only).
    #[arg(long)]
    navigate: Option<String>,

    /// Frame rate of the replay clock.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    schema: bool,
}

/// Simulated frame clock, so replays are deterministic.
struct Clock {
    start: Instant,
    step: Duration,
    frame: u64,
}

impl Clock {
    fn new(fps: u32) -> Self {
        Self {
            start: Instant::now(),
            step: Duration::from_secs(1) / fps.max(1),
            frame: 0,
        }
    }

    fn elapsed(&self) -> Duration {
        self.step * u32::try_from(self.frame).unwrap_or(u32::MAX)
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }
}

#[derive(Serialize)]
struct Frame<T: Serialize> {
    frame: u64,
    ms: u64,
    geometry: T,
}

#[derive(Serialize)]
struct BarsGeometry<'a> {
    height: f64,
    segments: &'a [Segment],
    ticks: &'a [Tick],
    breadcrumbs: &'a [Breadcrumb],
}

/// Tick `chart` until it settles, writing one line per frame.
fn play<C, S, W>(
    chart: &mut C,
    clock: &mut Clock,
    out: &mut W,
    snapshot: impl Fn(&C) -> S,
) -> io::Result<()>
where
    C: Chart,
    S: Serialize,
    W: Write,
{
    let first = clock.frame;
    loop {
        let animating = chart.tick(clock.now());
        let frame = Frame {
            frame: clock.frame,
            ms: clock.elapsed().as_millis() as u64,
            geometry: snapshot(chart),
        };
        serde_json::to_writer(&mut *out, &frame)?;
        writeln!(out)?;
        clock.frame += 1;
        if !animating {
            log::info!("settled after {} frame(s)", clock.frame - first);
            return Ok(());
        }
        if clock.frame - first >= MAX_FRAMES {
            log::warn!("replay cut off after {MAX_FRAMES} frames");
            return Ok(());
        }
    }
}

fn data_files(args: &Args) -> Vec<&Path> {
    args.data
        .iter()
        .chain(&args.then)
        .map(PathBuf::as_path)
        .collect()
}

fn run_bubble(args: &Args, options: &Options, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let mut chart = BubbleChart::new(options);
    let mut clock = Clock::new(args.fps);
    for path in data_files(args) {
        let _ = chart.set_data(load_items(path)?)?;
        play(&mut chart, &mut clock, out, |c| c.nodes().to_vec())?;
    }
    Ok(())
}

fn run_pie(args: &Args, options: &Options, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let mut chart = PieChart::new(options);
    let mut clock = Clock::new(args.fps);
    for path in data_files(args) {
        let _ = chart.set_data(load_items(path)?)?;
        play(&mut chart, &mut clock, out, |c| c.wedges().to_vec())?;
    }
    Ok(())
}

fn run_bars(args: &Args, options: &Options, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let mut chart = SegmentedBarChart::new(options);
    let mut clock = Clock::new(args.fps);
    let snapshot = |c: &SegmentedBarChart| {
        serde_json::to_value(BarsGeometry {
            height: c.height(),
            segments: c.segments(),
            ticks: c.ticks(),
            breadcrumbs: c.breadcrumbs(),
        })
        .unwrap_or_default()
    };
    for (i, path) in data_files(args).into_iter().enumerate() {
        let _ = chart.set_data(load_items(path)?)?;
        play(&mut chart, &mut clock, out, snapshot)?;
        if i > 0 {
            continue;
        }
        if let Some(route) = &args.navigate {
            let captions: Vec<&str> = route.split('/').filter(|c| !c.is_empty()).collect();
            if chart.navigate_to_path(&captions) {
                play(&mut chart, &mut clock, out, snapshot)?;
            } else {
                log::warn!("cannot navigate to {route:?}");
            }
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.schema {
        serde_json::to_writer_pretty(&mut out, &Options::json_schema())?;
        writeln!(out)?;
        out.flush()?;
        return Ok(());
    }

    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if args.data.is_none() {
        return Err("no data file given".into());
    }
    match args.chart {
        ChartKind::Bubble => run_bubble(args, &options, &mut out)?,
        ChartKind::Pie => run_pie(args, &options, &mut out)?,
        ChartKind::Bars => run_bars(args, &options, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
