use console::Style;
use mykomap_core::frame::format_date_key;
use mykomap_core::pipeline::{PipelineConfig, RunOutcome, RunReport};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_config_summary(config: &PipelineConfig) {
    let s = Styles::new();

    print_title(&s, "Mykomap Pipeline");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Data dir"),
        s.path.apply_to(config.storage.root.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Retained"),
        s.value.apply_to(format!("{} frames", config.storage.max_frames))
    );
    println!();

    // Aggregation
    println!("  {}", s.header.apply_to("Aggregation"));
    let classes: Vec<&str> = config
        .aggregation
        .classes
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    println!(
        "    {:<12}{}",
        s.label.apply_to("Classes"),
        s.method.apply_to(classes.join(", "))
    );
    println!(
        "    {:<12}{:?}",
        s.label.apply_to("Weights"),
        config.aggregation.weights
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Tolerance"),
        s.value.apply_to(format!("{:.0}%", config.aggregation.tolerance * 100.0))
    );
    println!();

    // Crop
    let crop = &config.crop;
    if crop.is_noop() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Crop"),
            s.disabled.apply_to("none")
        );
    } else {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Crop"),
            s.value.apply_to(format!(
                "L{} R{} T{} B{}",
                crop.left, crop.right, crop.top, crop.bottom
            ))
        );
    }
    println!();

    // Detection
    println!("  {}", s.header.apply_to("Detection"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min area"),
        s.value.apply_to(format!("{} px", config.detection.effective_min_area()))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("DBSCAN"),
        s.method.apply_to(format!(
            "eps {} / min {}",
            config.clustering.eps, config.clustering.min_samples
        ))
    );
    println!();

    let b = &config.bounds;
    println!(
        "  {:<14}{}",
        s.header.apply_to("Bounds"),
        s.value.apply_to(format!(
            "N {} S {} E {} W {}",
            b.north, b.south, b.east, b.west
        ))
    );
    println!();
}

pub fn print_run_summary(outcome: &RunOutcome) {
    let s = Styles::new();

    match outcome {
        RunOutcome::UpToDate(current) => {
            print_title(&s, "Up to date");
            println!(
                "  {:<14}{}",
                s.label.apply_to("Date"),
                s.value.apply_to(format_date_key(current.date))
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("GeoJSON"),
                s.path.apply_to(&current.features)
            );
            println!();
        }
        RunOutcome::Published(report) => print_report(&s, report),
    }
}

fn print_report(s: &Styles, report: &RunReport) {
    print_title(s, "Run complete");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Date"),
        s.value.apply_to(format_date_key(report.date))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(report.frames_used)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.value
            .apply_to(format!("{}x{}", report.image_size.0, report.image_size.1))
    );
    match report.strategy {
        Some(kind) => println!(
            "  {:<14}{} ({} px)",
            s.label.apply_to("Strategy"),
            s.method.apply_to(kind),
            report.matched_pixels
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Strategy"),
            s.disabled.apply_to("no match")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Regions"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Detected"),
        s.value.apply_to(report.regions)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Clusters"),
        s.value.apply_to(report.clusters)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Features"),
        s.value.apply_to(report.features)
    );
    if report.skipped_polygons > 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Skipped"),
            s.disabled.apply_to(report.skipped_polygons)
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Artifacts"));
    for name in [
        &report.artifacts.composite,
        &report.artifacts.features,
        &report.artifacts.visualization,
    ] {
        println!("    {}", s.path.apply_to(name));
    }
    println!();
}
