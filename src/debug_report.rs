use holdings_years::{Context, DiagnosticKind, Holdings, MatchSummary, ParseResultVerbose, StageTrace};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
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

pub fn print_run(res: &ParseResultVerbose, ctx: &Context, color: bool) {
    let palette = ansi::Palette::new(color);
    let holdings = &res.holdings;
    let details = &res.details;

    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", holdings.statement().trim()), ansi::CYAN)));
    println!(
        "  {} \"{}\"  {} {}",
        palette.dim("normalized:"),
        holdings.normalized(),
        palette.dim("│ current year:"),
        palette.paint(ctx.current_year.to_string(), ansi::BLUE)
    );

    println!("\n{}", palette.paint("━━━ Stages ━━━", ansi::GRAY));
    for stage in &details.stages {
        print_stage(stage, &palette);
    }

    if !holdings.diagnostics().is_empty() {
        println!("\n{}", palette.paint("━━━ Discarded ━━━", ansi::GRAY));
        for diag in holdings.diagnostics() {
            let reason = match diag.kind {
                DiagnosticKind::OutOfRange { year } => format!("{year} is not a plausible year"),
                DiagnosticKind::Reversed { start, end } => format!("{start} is after {end}"),
            };
            println!(
                "  {} {} {}",
                palette.paint(format!("\"{}\"", diag.matched.trim()), ansi::YELLOW),
                palette.dim(format!("({})", diag.rule)),
                palette.paint(reason, ansi::RED)
            );
        }
    }

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    if holdings.years_held().is_empty() {
        println!("{}", palette.dim("  No years found"));
    } else {
        print_results(holdings, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Normalize: {}  │  Active rules: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(format!("{:?}", details.normalize), ansi::CYAN),
        palette.dim(details.active_rules.len().to_string()),
    );
    println!();
}

fn print_stage(stage: &StageTrace, palette: &ansi::Palette) {
    let label = format!("{}:", stage.stage.label());
    println!(
        "  {} {}  {}",
        palette.paint(format!("{label:<14}"), ansi::BLUE),
        if stage.produced > 0 {
            palette.paint(format!("✓ {} years", stage.produced), ansi::GREEN)
        } else {
            palette.dim(format!("✗ {} years", stage.produced))
        },
        palette.dim(format!("{} rules active, {:?}", stage.rules_active, stage.duration))
    );

    for m in stage.matches.iter().take(5) {
        println!("    {}", fmt_match_compact(m, palette));
    }
    if stage.matches.len() > 5 {
        println!("    {}", palette.dim(format!("... +{} more", stage.matches.len() - 5)));
    }
    println!("    {} \"{}\"", palette.dim("residual:"), palette.dim(&stage.residual));
}

fn print_results(holdings: &Holdings, palette: &ansi::Palette) {
    println!("  {} {}", palette.dim("held:"), palette.bold(palette.paint(holdings.years().to_string(), ansi::GREEN)));
    println!(
        "  {} {}  {} {}  {} {}",
        palette.dim("earliest:"),
        palette.paint(holdings.earliest_year(), ansi::CYAN),
        palette.dim("│ latest:"),
        palette.paint(holdings.latest_year(), ansi::CYAN),
        palette.dim("│ span:"),
        palette.paint(holdings.year_span().to_string(), ansi::YELLOW)
    );

    let gaps = holdings.gaps();
    if !gaps.is_empty() {
        let listed: Vec<String> = gaps
            .iter()
            .map(|gap| if gap.start() == gap.end() { gap.start().to_string() } else { format!("{}-{}", gap.start(), gap.end()) })
            .collect();
        println!(
            "  {} {} {}",
            palette.dim("missing:"),
            palette.paint(listed.join(", "), ansi::YELLOW),
            palette.dim(format!("({} years)", holdings.missing_years().len()))
        );
    }
}

fn fmt_match_compact(m: &MatchSummary, palette: &ansi::Palette) -> String {
    let expr = &m.expression;
    let produced = if expr.start == expr.end { expr.start.to_string() } else { format!("{}..={}", expr.start, expr.end) };
    format!(
        "{} {} {} {}",
        palette.paint(format!("{}..{}", m.start, m.end), ansi::YELLOW),
        palette.paint(&m.rule, ansi::BLUE),
        palette.dim(format!("\"{}\"", m.text.trim())),
        if m.years.is_empty() { palette.paint(format!("✗ {produced}"), ansi::RED) } else { palette.paint(format!("→ {produced}"), ansi::GREEN) }
    )
}
