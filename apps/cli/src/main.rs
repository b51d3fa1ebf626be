#![deny(warnings)]

//! Headless planner: generate a plan, apply edits, print the result.

use agro_core::{
    validate_params, CellKind, Climate, EconomicProjection, Investment, PlannerConfig, Rainfall,
    Soil, SpeciesKind,
};
use agro_econ::EconomicsTables;
use agro_geo::GeoPoint;
use agro_session::{CellEdit, PlanState, PlanningSession};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    area: Option<f64>,
    soil: Option<Soil>,
    rainfall: Option<Rainfall>,
    climate: Option<Climate>,
    investment: Option<Investment>,
    seed: Option<u64>,
    square: Option<(GeoPoint, f64)>,
    paints: Vec<CellEdit>,
    border: bool,
    json: bool,
}

fn value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    it.next().with_context(|| format!("{flag} needs a value"))
}

fn parse_paint(s: &str) -> Result<CellEdit> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        bail!("--paint expects row,col,kind[,label], got {s:?}");
    }
    let row = parts[0].parse().with_context(|| format!("bad row in {s:?}"))?;
    let col = parts[1].parse().with_context(|| format!("bad col in {s:?}"))?;
    let kind: SpeciesKind = parts[2].parse()?;
    let label = parts.get(3).filter(|l| !l.is_empty()).map(|l| l.to_string());
    Ok(CellEdit::new(row, col, kind, label))
}

fn parse_square(s: &str) -> Result<(GeoPoint, f64)> {
    let nums = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("--square expects lat,lng,side_m, got {s:?}"))?;
    match nums.as_slice() {
        [lat, lng, side] => Ok((GeoPoint::new(*lat, *lng), *side)),
        _ => bail!("--square expects lat,lng,side_m, got {s:?}"),
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut out = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => out.config = Some(value(&mut it, &arg)?.into()),
            "--area" => {
                let v = value(&mut it, &arg)?;
                out.area = Some(v.parse().with_context(|| format!("bad area {v:?}"))?);
            }
            "--soil" => out.soil = Some(value(&mut it, &arg)?.parse()?),
            "--rainfall" => out.rainfall = Some(value(&mut it, &arg)?.parse()?),
            "--climate" => out.climate = Some(value(&mut it, &arg)?.parse()?),
            "--investment" => out.investment = Some(value(&mut it, &arg)?.parse()?),
            "--seed" => {
                let v = value(&mut it, &arg)?;
                out.seed = Some(v.parse().with_context(|| format!("bad seed {v:?}"))?);
            }
            "--square" => out.square = Some(parse_square(&value(&mut it, &arg)?)?),
            "--paint" => out.paints.push(parse_paint(&value(&mut it, &arg)?)?),
            "--border" => out.border = true,
            "--json" => out.json = true,
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(out)
}

fn load_config(args: &Args) -> Result<PlannerConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => PlannerConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.rng_seed = seed;
    }
    let p = &mut cfg.params;
    p.area = args.area.unwrap_or(p.area);
    p.soil = args.soil.unwrap_or(p.soil);
    p.rainfall = args.rainfall.unwrap_or(p.rainfall);
    p.climate = args.climate.unwrap_or(p.climate);
    p.investment = args.investment.unwrap_or(p.investment);
    Ok(cfg)
}

fn cell_char(kind: CellKind, label: &str) -> char {
    let initial = label.chars().next();
    match kind {
        CellKind::Empty => '.',
        CellKind::Tree => initial.map_or('T', |c| c.to_ascii_uppercase()),
        CellKind::Crop => initial.map_or('c', |c| c.to_ascii_lowercase()),
    }
}

/// Income per projection year; year 0 carries the initial outlay.
fn projection_lines(e: &EconomicProjection) -> Vec<String> {
    e.income_yearly
        .iter()
        .enumerate()
        .map(|(year, income)| format!("year {year}: {income}"))
        .collect()
}

fn print_summary(state: &PlanState) {
    let p = &state.params;
    println!(
        "Plot | {} acres | soil: {} | rainfall: {} | climate: {} | investment: {}",
        p.area, p.soil, p.rainfall, p.climate, p.investment
    );
    println!("Trees: {}", state.recommendation.trees.join(", "));
    println!("Crops: {}", state.recommendation.crops.join(", "));
    for pattern in &state.recommendation.patterns {
        println!("  - {pattern}");
    }

    println!("Grid {}x{}:", state.grid.rows(), state.grid.cols());
    for r in 0..state.grid.rows() {
        let line: String = state
            .grid
            .row(r)
            .unwrap_or(&[])
            .iter()
            .map(|cell| cell_char(cell.kind, &cell.label))
            .collect();
        println!("  {line}");
    }

    println!("Legend:");
    for entry in state.legend() {
        println!(
            "  {} {:<14} {} ({})",
            cell_char(entry.kind, &entry.label),
            entry.label,
            entry.color,
            match entry.kind {
                CellKind::Tree => "tree",
                _ => "crop",
            }
        );
    }

    let e = &state.economics;
    println!(
        "Economics | cost: {} | yield: {} | roi: {}%",
        e.cost, e.yield_value, e.roi
    );
    for line in projection_lines(e) {
        println!("  {line}");
    }

    println!("Advice:");
    for tip in state.advice() {
        println!("  * {tip}");
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    info!(
        sha = env!("GIT_SHA"),
        built = env!("BUILD_DATE"),
        "agroplan starting"
    );

    let cfg = load_config(&args)?;
    validate_params(&cfg.params)?;

    let mut session = PlanningSession::new(&cfg);
    if let Some(path) = &cfg.tables {
        let tables = EconomicsTables::load(path)
            .with_context(|| format!("loading tables from {}", path.display()))?;
        session = session.with_tables(tables);
    }

    session.submit(cfg.params);
    if let Some((center, side)) = args.square {
        let measured = agro_geo::square_area(center, side);
        let changed = session.set_area_m2(measured.m2 as f64);
        info!(m2 = measured.m2, changed, "area selected");
    }
    if args.border {
        session.apply_border_template();
    }
    if !args.paints.is_empty() {
        session.paint_stroke(&args.paints)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.state())?);
    } else {
        println!(
            "agroplan {} ({})",
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        print_summary(session.state());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn flags_override_config_defaults() {
        let a = args(&["--area", "2.5", "--soil", "clay", "--seed", "9", "--json"]).unwrap();
        let cfg = load_config(&a).unwrap();
        assert_eq!(cfg.params.area, 2.5);
        assert_eq!(cfg.params.soil, Soil::Clay);
        assert_eq!(cfg.params.climate, Climate::Tropical);
        assert_eq!(cfg.rng_seed, 9);
        assert!(a.json);
    }

    #[test]
    fn paint_arguments() {
        let a = args(&["--paint", "1,2,tree,Teak", "--paint", "0,0,crop"]).unwrap();
        assert_eq!(a.paints[0], CellEdit::new(1, 2, SpeciesKind::Tree, Some("Teak".into())));
        assert_eq!(a.paints[1].label, None);
        assert!(args(&["--paint", "1,2"]).is_err());
        assert!(args(&["--paint", "1,2,shrub"]).is_err());
    }

    #[test]
    fn strict_values_and_unknown_flags() {
        assert!(args(&["--soil", "peat"]).is_err());
        assert!(args(&["--area"]).is_err());
        assert!(args(&["--verbose"]).is_err());
    }

    #[test]
    fn square_argument() {
        let a = args(&["--square", "20.5937,78.9629,100"]).unwrap();
        let (center, side) = a.square.unwrap();
        assert_eq!(center, GeoPoint::new(20.5937, 78.9629));
        assert_eq!(side, 100.0);
        assert!(args(&["--square", "1,2"]).is_err());
    }

    #[test]
    fn projection_years_start_at_zero() {
        let e = EconomicProjection {
            income_yearly: [-35_500, 20_881, 32_813, 44_745, 59_660],
            ..EconomicProjection::zero()
        };
        let lines = projection_lines(&e);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "year 0: -35500");
        assert_eq!(lines[4], "year 4: 59660");
    }

    #[test]
    fn grid_characters() {
        assert_eq!(cell_char(CellKind::Tree, "neem"), 'N');
        assert_eq!(cell_char(CellKind::Crop, "Millet"), 'm');
        assert_eq!(cell_char(CellKind::Empty, ""), '.');
    }
}
