use crate::engine::{self, Registry, RegistryError, RunMetrics, Selection};
use crate::ResponseValue;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

static DEFAULT_REGISTRY: Lazy<Registry> =
    Lazy::new(|| crate::responses::registry().expect("built-in response keys are non-empty"));

/// Where producers read the current time from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Local wall-clock time.
    System,
    /// A frozen instant, for reproducible replies.
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Ambient state handed to producers.
///
/// Producers never reach for globals: time comes from `clock` and randomness
/// from the context's generator, so a fixed clock plus a seed reproduces every
/// reply exactly.
#[derive(Debug, Clone)]
pub struct Context {
    pub clock: Clock,
    rng: StdRng,
}

impl Context {
    pub fn new(clock: Clock, seed: u64) -> Self {
        Context { clock, rng: StdRng::seed_from_u64(seed) }
    }

    /// System clock, deterministic randomness.
    pub fn seeded(seed: u64) -> Self {
        Context::new(Clock::System, seed)
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// An independent context for an async producer: same clock, generator
    /// reseeded from this one's stream.
    pub fn fork(&mut self) -> Context {
        Context { clock: self.clock, rng: StdRng::seed_from_u64(self.rng.r#gen()) }
    }
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap();
            let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
            Context::new(Clock::Fixed(NaiveDateTime::new(date, time)), 0)
        } else {
            Context { clock: Clock::System, rng: StdRng::from_entropy() }
        }
    }
}

/// Fallback texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Reply to a blank message.
    pub empty_message: String,
    /// Reply when no key clears the confidence floor.
    pub unsuccessful: String,
}

impl Options {
    pub const EMPTY_MESSAGE: &'static str = "Your message seems empty. Please type something!";
    pub const UNSUCCESSFUL: &'static str = "Working on it... 🌱";
}

impl Default for Options {
    fn default() -> Self {
        Options { empty_message: Self::EMPTY_MESSAGE.to_string(), unsuccessful: Self::UNSUCCESSFUL.to_string() }
    }
}

/// How a resolution ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The message was blank; nothing was ranked.
    Empty,
    /// The best score did not clear the floor (`best` is 0 for an empty registry).
    Unmatched { best: f64 },
    /// `key` won with `score`.
    Matched { key: String, score: f64 },
}

/// Verbose result from [`Resolver::resolve_verbose`] and [`resolve_verbose_with`].
#[derive(Debug, Clone)]
pub struct Resolution {
    pub text: String,
    pub outcome: Outcome,
    /// Every `(key, score)` of the ranking pass in registry order.
    pub ratings: Vec<(String, f64)>,
    pub metrics: RunMetrics,
}

/// A registry plus the context and options used to resolve against it.
///
/// `add_responses` needs `&mut self`, so registry extension can never overlap
/// a resolution in flight.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Registry,
    context: Context,
    options: Options,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new()
    }
}

impl Resolver {
    /// Resolver over the built-in responses.
    pub fn new() -> Self {
        Resolver::with_registry(DEFAULT_REGISTRY.clone())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Resolver { registry, context: Context::default(), options: Options::default() }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Merge `extra` into the supplemental layer. Later keys shadow earlier
    /// ones, built-ins included.
    pub fn add_responses<I, K>(&mut self, extra: I) -> Result<usize, RegistryError>
    where
        I: IntoIterator<Item = (K, ResponseValue)>,
        K: AsRef<str>,
    {
        self.registry.extend(extra)
    }

    pub fn resolve(&mut self, message: &str) -> String {
        run(&self.registry, &mut self.context, &self.options, message)
    }

    pub async fn resolve_async(&mut self, message: &str) -> String {
        run_async(&self.registry, &mut self.context, &self.options, message).await
    }

    pub fn resolve_verbose(&mut self, message: &str) -> Resolution {
        run_verbose(&self.registry, &mut self.context, &self.options, message)
    }
}

/// Resolve `message` against the built-in responses with a default [`Context`].
///
/// # Example
/// ```
/// use replybot::{Options, resolve};
///
/// assert_eq!(resolve("hi"), "Hi there!👋 How can I help you?");
/// assert_eq!(resolve("   "), Options::EMPTY_MESSAGE);
/// ```
pub fn resolve(message: &str) -> String {
    resolve_with(message, &mut Context::default(), &Options::default())
}

/// Awaitable variant of [`resolve`].
pub async fn resolve_async(message: &str) -> String {
    run_async(&DEFAULT_REGISTRY, &mut Context::default(), &Options::default(), message).await
}

/// Resolve against the built-in responses with the provided `context`/`options`.
pub fn resolve_with(message: &str, context: &mut Context, options: &Options) -> String {
    run(&DEFAULT_REGISTRY, context, options, message)
}

/// Like [`resolve_with`], but also reports the ranking and timings.
pub fn resolve_verbose_with(message: &str, context: &mut Context, options: &Options) -> Resolution {
    run_verbose(&DEFAULT_REGISTRY, context, options, message)
}

fn run(registry: &Registry, context: &mut Context, options: &Options, message: &str) -> String {
    match engine::select(registry, message) {
        Selection::Empty => options.empty_message.clone(),
        Selection::Unmatched { .. } => options.unsuccessful.clone(),
        Selection::Matched { value, .. } => engine::produce(value, message, context),
    }
}

async fn run_async(registry: &Registry, context: &mut Context, options: &Options, message: &str) -> String {
    match engine::select(registry, message) {
        Selection::Empty => options.empty_message.clone(),
        Selection::Unmatched { .. } => options.unsuccessful.clone(),
        Selection::Matched { value, .. } => engine::produce_async(value, message, context).await,
    }
}

fn run_verbose(registry: &Registry, context: &mut Context, options: &Options, message: &str) -> Resolution {
    let started = Instant::now();
    let mut metrics = RunMetrics::default();

    let selection = engine::select(registry, message);
    metrics.rank = started.elapsed();

    let (text, outcome, ranking) = match selection {
        Selection::Empty => (options.empty_message.clone(), Outcome::Empty, None),
        Selection::Unmatched { ranking } => {
            let best = ranking.as_ref().map(|r| r.best().rating).unwrap_or(0.0);
            (options.unsuccessful.clone(), Outcome::Unmatched { best }, ranking)
        }
        Selection::Matched { ranking, value } => {
            let produce_started = Instant::now();
            let text = engine::produce(value, message, context);
            metrics.produce = produce_started.elapsed();

            let best = ranking.best();
            (text, Outcome::Matched { key: best.target.to_string(), score: best.rating }, Some(ranking))
        }
    };

    let ratings: Vec<(String, f64)> = ranking
        .map(|r| r.ratings.iter().map(|rating| (rating.target.to_string(), rating.rating)).collect())
        .unwrap_or_default();

    metrics.candidates = ratings.len();
    metrics.total = started.elapsed();

    Resolution { text, outcome, ratings, metrics }
}
