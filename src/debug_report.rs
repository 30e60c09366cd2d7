use replybot::{CONFIDENCE_FLOOR, Outcome, Resolution};

/// How many ratings the report lists.
const TOP_N: usize = 5;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_resolution(input: &str, res: &Resolution, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("💬 Message: \"{}\"", input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Ranking ━━━", ansi::GRAY));
    print_ranking(res, &palette);

    println!("\n{}", palette.paint("━━━ Outcome ━━━", ansi::GRAY));
    print_outcome(res, &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Rank: {} ({} keys)  │  Produce: {}",
        palette.paint(format!("{:?}", res.metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.metrics.rank), ansi::CYAN),
        res.metrics.candidates,
        palette.dim(format!("{:?}", res.metrics.produce)),
    );
    println!();
}

fn print_ranking(res: &Resolution, palette: &ansi::Palette) {
    if res.ratings.is_empty() {
        println!("{}", palette.dim("  Nothing ranked"));
        return;
    }

    // Highest first; the stable sort keeps registry order among equal scores.
    let mut top: Vec<(usize, &(String, f64))> = res.ratings.iter().enumerate().collect();
    top.sort_by(|a, b| b.1.1.total_cmp(&a.1.1));

    for (idx, (key, score)) in top.iter().take(TOP_N) {
        let score_text = format!("{:.3}", score);
        let score_text = if *score > CONFIDENCE_FLOOR {
            palette.paint(score_text, ansi::GREEN)
        } else {
            palette.dim(score_text)
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{:>2}]", idx), ansi::GRAY),
            score_text,
            palette.dim("│"),
            palette.paint(key, ansi::BLUE),
        );
    }
    if res.ratings.len() > TOP_N {
        println!("  {}", palette.dim(format!("... +{} more", res.ratings.len() - TOP_N)));
    }
}

fn print_outcome(res: &Resolution, palette: &ansi::Palette) {
    match &res.outcome {
        Outcome::Empty => println!("  {}", palette.paint("empty message", ansi::YELLOW)),
        Outcome::Unmatched { best } => println!(
            "  {} {}",
            palette.paint("no confident match", ansi::YELLOW),
            palette.dim(format!("(best {:.3} <= floor {})", best, CONFIDENCE_FLOOR)),
        ),
        Outcome::Matched { key, score } => println!(
            "  {} {} {}",
            palette.paint("matched", ansi::GREEN),
            palette.bold(palette.paint(key, ansi::CYAN)),
            palette.dim(format!("({:.3})", score)),
        ),
    }
    println!("  {} {}", palette.dim("reply:"), palette.bold(&res.text));
}
