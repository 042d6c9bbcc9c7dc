use vestnik::{ExtractionDetails, ExtractionReport, KnownPerson, NodeSummary, date_label, resolve};

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

        fn wrap(&self, s: &str, code: &str) -> String {
            if self.enabled { format!("{code}{s}{RESET}") } else { s.to_string() }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.wrap(s.as_ref(), color)
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.wrap(s.as_ref(), BOLD)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.wrap(s.as_ref(), DIM)
        }
    }
}

pub fn print_run(report: &ExtractionReport, registry: &[KnownPerson], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Extracting: \"{}\"", report.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Date rules ━━━", ansi::GRAY));
    print_saturation(&report.date_details, &palette);

    println!("\n{}", palette.paint("━━━ Name rules ━━━", ansi::GRAY));
    print_saturation(&report.name_details, &palette);

    println!("\n{}", palette.paint("━━━ Dates ━━━", ansi::GRAY));
    if report.dates.is_empty() {
        print_nothing_found(&report.date_details, &palette);
    }
    for (idx, m) in report.dates.iter().enumerate() {
        println!(
            "  {} {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.bold(palette.paint(m.value.to_string(), ansi::GREEN)),
            palette.dim(format!("({})", date_label(m.value))),
            palette.dim("│"),
            palette.paint(format!("\"{}\" {}..{}", m.body, m.start, m.end), ansi::YELLOW),
        );
        println!("      {} {}", palette.dim("rule:"), palette.paint(m.rule, ansi::CYAN));
    }

    println!("\n{}", palette.paint("━━━ Persons ━━━", ansi::GRAY));
    if report.persons.is_empty() {
        print_nothing_found(&report.name_details, &palette);
    }
    for (idx, m) in report.persons.iter().enumerate() {
        let contact = match resolve(&m.value, registry) {
            Some(known) => palette.paint(
                format!(
                    "{} / {}",
                    known.handle.as_deref().unwrap_or("n/a"),
                    known.delivery_id.as_deref().unwrap_or("n/a")
                ),
                ansi::GREEN,
            ),
            None => palette.dim("not in registry"),
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.bold(palette.paint(m.value.to_string(), ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("\"{}\" {}..{}", m.body, m.start, m.end), ansi::YELLOW),
        );
        println!(
            "      {} {}  {} {}  {} {}",
            palette.dim("rule:"),
            palette.paint(m.rule, ansi::CYAN),
            palette.dim("│ full:"),
            palette.paint(m.value.is_full().to_string(), ansi::BLUE),
            palette.dim("│ contact:"),
            contact
        );
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Dates: {} (saturation {})  │  Names: {} (saturation {})",
        palette.paint(format!("{:?}", report.date_details.total), ansi::GREEN),
        palette.dim(format!("{:?}", report.date_details.saturation_total)),
        palette.paint(format!("{:?}", report.name_details.total), ansi::GREEN),
        palette.dim(format!("{:?}", report.name_details.saturation_total)),
    );
    println!();
}

fn print_saturation(details: &ExtractionDetails, palette: &ansi::Palette) {
    println!("  {} {}", palette.dim("active rules:"), palette.dim(details.active_rules.len().to_string()));
    for pass in &details.saturation {
        let label = if pass.pass == 0 { "Pass 0 (atoms):".to_string() } else { format!("Pass {}:", pass.pass) };

        println!(
            "  {} {} {}",
            palette.paint(label, ansi::BLUE),
            if pass.produced > 0 {
                palette.paint(format!("✓ {} tokens", pass.produced), ansi::GREEN)
            } else {
                palette.dim(format!("✗ {} tokens", pass.produced))
            },
            palette.dim(format!("({}/{} rules seeded)", pass.rules_seeded, pass.rules_considered))
        );

        for node in pass.samples.iter().take(5) {
            println!("    {}", fmt_node_compact(node, palette));
        }
        if pass.samples.len() > 5 {
            println!("    {}", palette.dim(format!("... +{} more", pass.samples.len() - 5)));
        }
    }
}

fn print_nothing_found(details: &ExtractionDetails, palette: &ansi::Palette) {
    if details.candidates.is_empty() {
        println!("{}", palette.dim("  Nothing matched"));
        return;
    }
    println!("{}", palette.paint("  All candidates were rejected:", ansi::YELLOW));
    for node in &details.candidates {
        println!("    {}", fmt_node_compact(node, palette));
    }
    println!("\n{}", palette.dim("  Tip: RUST_LOG=vestnik::engine=trace shows why"));
}

fn fmt_node_compact(node: &NodeSummary, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {}",
        palette.paint(format!("{}..{}", node.start, node.end), ansi::YELLOW),
        palette.paint(&node.rule, ansi::BLUE),
        palette.dim(&node.preview)
    )
}
