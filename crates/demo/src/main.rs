// File: crates/demo/src/main.rs
// Summary: Demo loads temperature readings from CSV, renders the chart panel and saves both exports.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use thermograph_panel::requirements::requirement_series;
use thermograph_panel::thermograph_core::theme;
use thermograph_panel::{ChartPanel, DirectorySink, Page, PanelOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const REGION: &str = "chart";

/// Chart a day of apartment temperature readings.
#[derive(Debug, Parser)]
#[command(name = "thermograph-demo", version)]
struct Args {
    /// Readings CSV with a local datetime column and a fahrenheit column
    input: PathBuf,

    /// Output directory for chart.png and chart.csv
    #[arg(short, long, default_value = "target/out")]
    out: PathBuf,

    /// Keep only readings on this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Region size (WIDTHxHEIGHT)
    #[arg(long, default_value = "800x400", value_parser = parse_size)]
    size: (u32, u32),

    /// Theme preset
    #[arg(long, default_value = "light")]
    theme: String,
}

/// Dates are accepted in `YYYY-MM-DD` form only.
fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").with_context(|| format!("invalid date '{raw}'"))
}

fn parse_size(raw: &str) -> Result<(u32, u32)> {
    let (w, h) = raw.split_once(['x', 'X']).with_context(|| format!("invalid size '{raw}'"))?;
    let w = w.trim().parse().with_context(|| format!("invalid width in '{raw}'"))?;
    let h = h.trim().parse().with_context(|| format!("invalid height in '{raw}'"))?;
    Ok((w, h))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Load `(timestamp, fahrenheit)` rows, sorted chronologically. Rows that fail
/// to parse are skipped with a warning.
fn load_readings(path: &Path) -> Result<Vec<(NaiveDateTime, f64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let Some(i_time) = idx(&["datetime", "dttm", "dttm_nyc", "timestamp", "time"]) else {
        if idx(&["dttm_utc"]).is_some() {
            bail!("dttm_utc holds UTC times; provide local times in a dttm_nyc column");
        }
        bail!("no datetime column in {:?}", headers);
    };
    let Some(i_temp) = idx(&["fahrenheit", "temperature", "temp"]) else {
        bail!("no fahrenheit column in {:?}", headers);
    };

    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let ts = rec.get(i_time).and_then(parse_timestamp);
        let temp = rec.get(i_temp).and_then(|s| s.parse::<f64>().ok());
        match (ts, temp) {
            (Some(ts), Some(temp)) => out.push((ts, temp)),
            _ => warn!("skipping unreadable row {}: {:?}", line + 2, rec),
        }
    }
    out.sort_by_key(|&(ts, _)| ts);
    Ok(out)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut readings = load_readings(&args.input)
        .with_context(|| format!("failed to load readings from '{}'", args.input.display()))?;
    info!("loaded {} readings from {}", readings.len(), args.input.display());

    if let Some(day) = args.date {
        readings.retain(|(ts, _)| ts.date() == day);
        info!("{} readings on {}", readings.len(), day);
    }
    if readings.is_empty() {
        bail!("no readings to chart");
    }

    let (timestamps, temperatures): (Vec<NaiveDateTime>, Vec<f64>) = readings.into_iter().unzip();
    let requirements = requirement_series(&timestamps);
    if requirements.is_none() {
        info!("readings fall outside heat season; charting without requirements");
    }

    let mut page = Page::new();
    page.add_region(REGION, args.size.0, args.size.1);
    let mut options = PanelOptions::default();
    options.render.theme = theme::find(&args.theme);
    let handle = ChartPanel::new(options).render(&mut page, REGION, &timestamps, &temperatures, requirements.as_deref())?;

    let sink = Rc::new(RefCell::new(DirectorySink::new(&args.out)));
    handle.on_painted({
        let sink = Rc::clone(&sink);
        move |h| {
            if let Err(e) = h.export_image(&mut *sink.borrow_mut()) {
                warn!("image export failed: {e}");
            }
        }
    });
    handle.export_data(&mut *sink.borrow_mut())?;

    let painted = page.run_until_idle()?;
    info!("painted {} chart(s) into {}", painted, args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("thermograph-demo").chain(list.iter().copied()))
    }

    #[test]
    fn parses_flags_in_any_order() {
        let a = args(&["--date", "2019-01-06", "readings.csv", "--size", "640x320", "--out", "o"]).unwrap();
        assert_eq!(a.input, PathBuf::from("readings.csv"));
        assert_eq!(a.out, PathBuf::from("o"));
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2019, 1, 6));
        assert_eq!(a.size, (640, 320));
        assert_eq!(a.theme, "light");
        assert_eq!(args(&["r.csv", "--theme", "dark"]).unwrap().theme, "dark");
    }

    #[test]
    fn defaults() {
        let a = args(&["r.csv"]).unwrap();
        assert_eq!(a.out, PathBuf::from("target/out"));
        assert_eq!(a.size, (800, 400));
        assert!(a.date.is_none());
    }

    #[test]
    fn input_is_required() {
        assert!(args(&["--out", "o"]).is_err());
        assert!(args(&["a.csv", "b.csv"]).is_err());
        assert!(args(&["a.csv", "--date", "01/06/2019"]).is_err());
        assert!(args(&["a.csv", "--size", "640"]).is_err());
    }

    #[test]
    fn rejects_bad_date_and_size() {
        assert!(parse_date("2019-13-01").is_err());
        assert!(parse_date("01/06/2019").is_err());
        assert!(parse_size("640").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn timestamp_formats() {
        let want = NaiveDate::from_ymd_opt(2019, 1, 6).unwrap().and_hms_opt(20, 5, 0).unwrap();
        assert_eq!(parse_timestamp("2019-01-06T20:05:00"), Some(want));
        assert_eq!(parse_timestamp("2019-01-06 20:05:00"), Some(want));
        assert_eq!(parse_timestamp("2019-01-06 20:05"), Some(want));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn loads_and_sorts_readings() {
        let path = PathBuf::from("target/test_out/demo_readings.csv");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "dttm,fahrenheit\n2019-01-06 02:00:00,66\n2019-01-06 01:00:00,65.5\nbad,70\n",
        )
        .unwrap();
        let rows = load_readings(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1, 65.5);
        assert!(rows[0].0 < rows[1].0);
    }

    #[test]
    fn utc_only_readings_are_rejected() {
        let path = PathBuf::from("target/test_out/demo_readings_utc.csv");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "dttm_utc,fahrenheit\n2019-01-06 11:00:00,66\n").unwrap();
        let err = load_readings(&path).unwrap_err();
        assert!(err.to_string().contains("dttm_nyc"));
    }

    #[test]
    fn local_column_wins_over_utc() {
        let path = PathBuf::from("target/test_out/demo_readings_both.csv");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "dttm_utc,dttm_nyc,fahrenheit\n2019-01-06 11:00:00,2019-01-06 06:00:00,66\n",
        )
        .unwrap();
        let rows = load_readings(&path).unwrap();
        let local = NaiveDate::from_ymd_opt(2019, 1, 6).unwrap().and_hms_opt(6, 0, 0).unwrap();
        assert_eq!(rows, vec![(local, 66.0)]);
    }
}
