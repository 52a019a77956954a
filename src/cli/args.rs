use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mission-report")]
#[command(
    author,
    version,
    about = "Render air-combat training mission reports to paginated PDF"
)]
pub struct Args {
    /// Input report file (JSON)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output PDF file path (defaults to the generated report name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for the generated report when --output is not given
    #[arg(long, conflicts_with = "output")]
    pub output_dir: Option<PathBuf>,

    /// Page size (overrides the style file)
    #[arg(short = 's', long, value_enum)]
    pub page_size: Option<PageSize>,

    /// Page orientation (overrides the style file)
    #[arg(long, value_enum)]
    pub orientation: Option<Orientation>,

    /// Style file (JSON) overriding page geometry, palette, fonts and text
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Write uncompressed PDF streams
    #[arg(long)]
    pub no_compress: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PageSize {
    Letter,
    A4,
    Legal,
}

impl PageSize {
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (215.9, 279.4),
            PageSize::A4 => (210.0, 297.0),
            PageSize::Legal => (215.9, 355.6),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Args {
    /// Resolve the output path.
    ///
    /// An explicit `--output` wins; otherwise `file_name` is placed in
    /// `--output-dir`, or next to the input file.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .map(PathBuf::from)
                .unwrap_or_default(),
        };
        dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["mission-report", "report.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("report.json"));
        assert!(args.page_size.is_none());
        assert!(args.orientation.is_none());
        assert!(!args.no_compress);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "mission-report",
            "report.json",
            "-s",
            "letter",
            "--orientation",
            "landscape",
            "--no-compress",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.page_size, Some(PageSize::Letter));
        assert_eq!(args.orientation, Some(Orientation::Landscape));
        assert!(args.no_compress);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_output_conflicts_with_output_dir() {
        let result = Args::try_parse_from([
            "mission-report",
            "report.json",
            "-o",
            "a.pdf",
            "--output-dir",
            "out",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_path() {
        let args = Args::try_parse_from(["mission-report", "data/report.json"]).unwrap();
        assert_eq!(
            args.output_path("Rapport.pdf"),
            PathBuf::from("data/Rapport.pdf")
        );

        let args =
            Args::try_parse_from(["mission-report", "report.json", "--output-dir", "out"]).unwrap();
        assert_eq!(args.output_path("Rapport.pdf"), PathBuf::from("out/Rapport.pdf"));

        let args = Args::try_parse_from(["mission-report", "report.json", "-o", "x.pdf"]).unwrap();
        assert_eq!(args.output_path("Rapport.pdf"), PathBuf::from("x.pdf"));
    }

    #[test]
    fn test_page_dimensions() {
        let (w, h) = PageSize::A4.dimensions_mm();
        assert!((w - 210.0).abs() < 0.1);
        assert!((h - 297.0).abs() < 0.1);
    }
}
