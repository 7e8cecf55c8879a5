//! Interactive command loop.
//!
//! Reads single-letter commands, keeps one "current" image and replaces it
//! with each filter's result. Input and output are generic so the loop can
//! be driven from stdin/stdout or from in-memory buffers.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::{EditorError, Result};
use crate::filters::{self, EdgeDetector};
use crate::io::{load_image, save_image};

const MENU: &str = "\
L)oad Image
B)lur   E)dge detect   P)osterize   S)catter   T)int sepia
G)rayscale   W)eighted grayscale   X)treme contrast   V) Save As
Q)uit";

/// A menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Load,
    Blur,
    EdgeDetect,
    Posterize,
    Scatter,
    SepiaTint,
    Grayscale,
    WeightedGrayscale,
    ExtremeContrast,
    Save,
    Quit,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Command::Load,
        Command::Blur,
        Command::EdgeDetect,
        Command::Posterize,
        Command::Scatter,
        Command::SepiaTint,
        Command::Grayscale,
        Command::WeightedGrayscale,
        Command::ExtremeContrast,
        Command::Save,
        Command::Quit,
    ];

    pub fn letter(self) -> char {
        match self {
            Command::Load => 'L',
            Command::Blur => 'B',
            Command::EdgeDetect => 'E',
            Command::Posterize => 'P',
            Command::Scatter => 'S',
            Command::SepiaTint => 'T',
            Command::Grayscale => 'G',
            Command::WeightedGrayscale => 'W',
            Command::ExtremeContrast => 'X',
            Command::Save => 'V',
            Command::Quit => 'Q',
        }
    }

    /// Whether the command operates on the current image.
    pub fn needs_image(self) -> bool {
        !matches!(self, Command::Load | Command::Quit)
    }

    /// Run the filter behind this command.
    ///
    /// `threshold` and `detector` are only read by the edge command and
    /// `rng` only by scatter. Returns `None` for load, save and quit.
    pub fn apply_filter<R: Rng>(
        self,
        image: ArrayView3<u8>,
        threshold: f32,
        detector: EdgeDetector,
        rng: &mut R,
    ) -> Option<Array3<u8>> {
        let result = match self {
            Command::Blur => filters::blur(image),
            Command::EdgeDetect => detector.apply(image, threshold),
            Command::Posterize => filters::posterize(image),
            Command::Scatter => filters::scatter_with_rng(image, rng),
            Command::SepiaTint => filters::sepia_tint(image),
            Command::Grayscale => filters::grayscale(image),
            Command::WeightedGrayscale => filters::weighted_grayscale(image),
            Command::ExtremeContrast => filters::extreme_contrast(image),
            Command::Load | Command::Save | Command::Quit => return None,
        };
        Some(result)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Command {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                let c = c.to_ascii_uppercase();
                Command::ALL
                    .into_iter()
                    .find(|cmd| cmd.letter() == c)
                    .ok_or_else(|| EditorError::UnknownCommand(trimmed.to_string()))
            }
            _ => Err(EditorError::UnknownCommand(trimmed.to_string())),
        }
    }
}

/// Parse the answer to the threshold prompt.
pub fn parse_threshold(text: &str) -> Result<f32> {
    let trimmed = text.trim();
    match trimmed.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EditorError::InvalidThreshold(trimmed.to_string())),
    }
}

// ============================================================================
// Preview sinks
// ============================================================================

/// Receives the current image whenever it changes.
pub trait Preview {
    fn show(&mut self, image: ArrayView3<u8>) -> Result<()>;
}

/// Logs the image dimensions.
#[derive(Debug, Default)]
pub struct LogPreview;

impl Preview for LogPreview {
    fn show(&mut self, image: ArrayView3<u8>) -> Result<()> {
        let (height, width, channels) = image.dim();
        info!(width, height, channels, "current image updated");
        Ok(())
    }
}

/// Writes the image to a fixed path for an external viewer to pick up.
#[derive(Debug)]
pub struct FilePreview {
    path: PathBuf,
}

impl FilePreview {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Preview for FilePreview {
    fn show(&mut self, image: ArrayView3<u8>) -> Result<()> {
        save_image(image, &self.path)
    }
}

impl<P: Preview + ?Sized> Preview for Box<P> {
    fn show(&mut self, image: ArrayView3<u8>) -> Result<()> {
        (**self).show(image)
    }
}

// ============================================================================
// Session
// ============================================================================

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One interactive editing session.
pub struct Session<R, W, P> {
    config: SessionConfig,
    input: R,
    output: W,
    preview: P,
    rng: StdRng,
    image: Option<Array3<u8>>,
}

impl<R: BufRead, W: Write, P: Preview> Session<R, W, P> {
    pub fn new(config: SessionConfig, input: R, output: W, preview: P) -> Self {
        let rng = match config.scatter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            config,
            input,
            output,
            preview,
            rng,
            image: None,
        }
    }

    /// Start with an image already loaded.
    pub fn with_image(mut self, image: Array3<u8>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn image(&self) -> Option<&Array3<u8>> {
        self.image.as_ref()
    }

    /// Run until `Q` or end of input.
    ///
    /// Returns an error only for fatal conditions: cancelling the very first
    /// load, or failing to write to the output.
    pub fn run(&mut self) -> Result<()> {
        info!(edge_detector = %self.config.edge_detector, "session started");
        self.refresh_preview();
        while self.step()? == Flow::Continue {}
        info!("session finished");
        Ok(())
    }

    /// Show the menu, read one command and execute it.
    pub fn step(&mut self) -> Result<Flow> {
        writeln!(self.output, "{MENU}")?;
        let Some(line) = self.prompt("Selection: ")? else {
            return Ok(Flow::Quit);
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(_) => {
                writeln!(self.output, "No such command")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(%command, "command received");

        if command.needs_image() && self.image.is_none() {
            writeln!(self.output, "No image loaded")?;
            return Ok(Flow::Continue);
        }

        self.execute(command)
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Load => return self.load(),
            Command::Save => return self.save(),
            _ => {}
        }

        let threshold = if command == Command::EdgeDetect {
            let Some(text) = self.prompt("Threshold: ")? else {
                return Ok(Flow::Quit);
            };
            match parse_threshold(&text) {
                Ok(threshold) => threshold,
                Err(e) => {
                    self.report(&e)?;
                    return Ok(Flow::Continue);
                }
            }
        } else {
            0.0
        };

        let detector = self.config.edge_detector;
        let filtered = self.image.as_ref().and_then(|image| {
            command.apply_filter(image.view(), threshold, detector, &mut self.rng)
        });
        if let Some(image) = filtered {
            self.replace_image(image);
        }
        Ok(Flow::Continue)
    }

    fn load(&mut self) -> Result<Flow> {
        let path = self.prompt("Image path: ")?.unwrap_or_default();
        if path.is_empty() {
            if self.image.is_none() {
                return Err(EditorError::LoadCancelled);
            }
            writeln!(self.output, "Load cancelled")?;
            return Ok(Flow::Continue);
        }

        match load_image(&path) {
            Ok(image) => self.replace_image(image),
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Input File Name: ")? else {
            return Ok(Flow::Quit);
        };
        if name.is_empty() {
            writeln!(self.output, "No file name given")?;
            return Ok(Flow::Continue);
        }

        let path = self.config.save_path(&name);
        let saved = match &self.image {
            Some(image) => save_image(image.view(), &path),
            None => return Ok(Flow::Continue),
        };
        match saved {
            Ok(()) => writeln!(self.output, "Saved {}", path.display())?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn replace_image(&mut self, image: Array3<u8>) {
        self.image = Some(image);
        self.refresh_preview();
    }

    /// Show the current image; a failing preview is logged, never fatal.
    fn refresh_preview(&mut self) {
        let Some(image) = &self.image else {
            return;
        };
        if let Err(e) = self.preview.show(image.view()) {
            warn!(error = %e, "preview failed");
        }
    }

    fn report(&mut self, error: &EditorError) -> Result<()> {
        warn!(%error, "command failed");
        writeln!(self.output, "Error: {error}")?;
        Ok(())
    }

    /// Print `label` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    use crate::filters::core::test_util::gradient;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<Array3<u8>>,
    }

    impl Preview for Recorder {
        fn show(&mut self, image: ArrayView3<u8>) -> Result<()> {
            self.shown.push(image.to_owned());
            Ok(())
        }
    }

    struct BrokenPreview;

    impl Preview for BrokenPreview {
        fn show(&mut self, _image: ArrayView3<u8>) -> Result<()> {
            Err(EditorError::UnsupportedChannels(0))
        }
    }

    type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>, Recorder>;

    fn session(script: &str, config: SessionConfig) -> TestSession {
        Session::new(
            config,
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            Recorder::default(),
        )
    }

    fn output(session: &TestSession) -> String {
        String::from_utf8_lossy(&session.output).into_owned()
    }

    fn write_png(dir: &Path, name: &str, image: &Array3<u8>) -> PathBuf {
        let path = dir.join(name);
        save_image(image.view(), &path).unwrap();
        path
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!("L".parse::<Command>().unwrap(), Command::Load);
        assert_eq!(" x \n".parse::<Command>().unwrap(), Command::ExtremeContrast);
        assert_eq!("v".parse::<Command>().unwrap(), Command::Save);
        assert!("Z".parse::<Command>().is_err());
        assert!("BE".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
        for command in Command::ALL {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_apply_filter() {
        let img = gradient(6, 6);
        let mut rng = StdRng::seed_from_u64(1);

        for command in [Command::Load, Command::Save, Command::Quit] {
            assert!(command
                .apply_filter(img.view(), 0.0, EdgeDetector::Better, &mut rng)
                .is_none());
        }

        let edges = Command::EdgeDetect
            .apply_filter(img.view(), 15.0, EdgeDetector::Classic, &mut rng)
            .unwrap();
        assert_eq!(edges, filters::detect_edges(img.view(), 15.0));

        let blurred = Command::Blur
            .apply_filter(img.view(), 0.0, EdgeDetector::Better, &mut rng)
            .unwrap();
        assert_eq!(blurred, filters::blur(img.view()));

        let scattered = Command::Scatter
            .apply_filter(img.view(), 0.0, EdgeDetector::Better, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(scattered, filters::scatter_seeded(img.view(), 9));
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("10").unwrap(), 10.0);
        assert_eq!(parse_threshold(" 12.5 ").unwrap(), 12.5);
        assert!(matches!(parse_threshold("ten"), Err(EditorError::InvalidThreshold(_))));
        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("inf").is_err());
    }

    #[test]
    fn test_quit_and_eof_end_session() {
        let mut s = session("Q\n", SessionConfig::default());
        s.run().unwrap();
        assert!(output(&s).contains("L)oad Image"));

        let mut s = session("", SessionConfig::default());
        s.run().unwrap();
    }

    #[test]
    fn test_unknown_command_reprompts() {
        let mut s = session("Z\nQ\n", SessionConfig::default());
        s.run().unwrap();
        assert!(output(&s).contains("No such command"));
        assert_eq!(output(&s).matches("Selection: ").count(), 2);
    }

    #[test]
    fn test_filters_need_an_image() {
        let mut s = session("B\nV\nQ\n", SessionConfig::default());
        s.run().unwrap();
        assert_eq!(output(&s).matches("No image loaded").count(), 2);
        assert!(s.image().is_none());
    }

    #[test]
    fn test_initial_load_cancel_is_fatal() {
        let mut s = session("L\n\n", SessionConfig::default());
        assert!(matches!(s.run(), Err(EditorError::LoadCancelled)));
    }

    #[test]
    fn test_load_cancel_with_image_continues() {
        let mut s = session("L\n\nQ\n", SessionConfig::default()).with_image(gradient(3, 3));
        s.run().unwrap();
        assert!(output(&s).contains("Load cancelled"));
        assert!(s.image().is_some());
    }

    #[test]
    fn test_load_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let script = format!("L\n{}\nQ\n", missing.display());

        let mut s = session(&script, SessionConfig::default());
        s.run().unwrap();

        assert!(output(&s).contains("Error: "));
        assert!(s.image().is_none());
    }

    #[test]
    fn test_load_blur_save() {
        let dir = tempfile::tempdir().unwrap();
        let img = gradient(8, 6);
        let input = write_png(dir.path(), "in.png", &img);
        let out_name = dir.path().join("result");
        let script = format!("L\n{}\nB\nV\n{}\nQ\n", input.display(), out_name.display());
        let config = SessionConfig {
            save_extension: "png".to_string(),
            ..SessionConfig::default()
        };

        let mut s = session(&script, config);
        s.run().unwrap();

        let expected = filters::blur(img.view());
        assert_eq!(s.image(), Some(&expected));
        assert_eq!(s.preview.shown, vec![img, expected.clone()]);

        let saved = load_image(dir.path().join("result.png")).unwrap();
        assert_eq!(saved, expected);
        assert!(output(&s).contains("Saved "));
    }

    #[test]
    fn test_edge_command_uses_configured_detector() {
        let img = gradient(9, 9);
        for detector in filters::EdgeDetector::ALL {
            let config = SessionConfig {
                edge_detector: detector,
                ..SessionConfig::default()
            };
            let mut s = session("E\n20\nQ\n", config).with_image(img.clone());
            s.run().unwrap();
            assert_eq!(s.image(), Some(&detector.apply(img.view(), 20.0)));
        }
    }

    #[test]
    fn test_invalid_threshold_keeps_image() {
        let img = gradient(5, 5);
        let mut s = session("E\nabc\nQ\n", SessionConfig::default()).with_image(img.clone());
        s.run().unwrap();
        assert!(output(&s).contains("invalid threshold"));
        assert_eq!(s.image(), Some(&img));
    }

    #[test]
    fn test_each_filter_command() {
        let img = gradient(7, 5);
        let cases: [(&str, Array3<u8>); 6] = [
            ("P", filters::posterize(img.view())),
            ("T", filters::sepia_tint(img.view())),
            ("G", filters::grayscale(img.view())),
            ("W", filters::weighted_grayscale(img.view())),
            ("X", filters::extreme_contrast(img.view())),
            ("b", filters::blur(img.view())),
        ];
        for (letter, expected) in cases {
            let mut s = session(&format!("{letter}\nQ\n"), SessionConfig::default())
                .with_image(img.clone());
            s.run().unwrap();
            assert_eq!(s.image(), Some(&expected), "command {letter}");
        }
    }

    #[test]
    fn test_seeded_scatter_is_reproducible() {
        let img = gradient(12, 12);
        let config = SessionConfig {
            scatter_seed: Some(3),
            ..SessionConfig::default()
        };
        let mut a = session("S\nS\nQ\n", config.clone()).with_image(img.clone());
        let mut b = session("S\nS\nQ\n", config).with_image(img);
        a.run().unwrap();
        b.run().unwrap();
        assert_eq!(a.image(), b.image());
    }

    #[test]
    fn test_empty_save_name() {
        let mut s = session("V\n\nQ\n", SessionConfig::default()).with_image(gradient(3, 3));
        s.run().unwrap();
        assert!(output(&s).contains("No file name given"));
    }

    #[test]
    fn test_preview_failure_is_not_fatal() {
        let img = gradient(4, 4);
        let mut s = Session::new(
            SessionConfig::default(),
            Cursor::new(b"G\nQ\n".to_vec()),
            Vec::new(),
            BrokenPreview,
        )
        .with_image(img.clone());

        s.run().unwrap();
        assert_eq!(s.image(), Some(&filters::grayscale(img.view())));
    }
}
