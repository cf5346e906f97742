//! FFmpeg command builder and runner

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::engine::EncodeSettings;
use crate::error::{ReelError, ReelResult};

/// One `-i` input with the options that precede it
#[derive(Debug, Clone, PartialEq)]
struct InputSpec {
    args: Vec<String>,
    path: PathBuf,
}

/// Builder for an ffmpeg invocation with any number of inputs
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    program: String,
    inputs: Vec<InputSpec>,
    output: PathBuf,
    output_args: Vec<String>,
}

impl FfmpegCommand {
    /// Create a command writing to `output`
    pub fn new(program: impl Into<String>, output: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            inputs: Vec::new(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
        }
    }

    /// Add an input file
    pub fn input(self, path: impl AsRef<Path>) -> Self {
        self.input_with_args(path, Vec::<String>::new())
    }

    /// Add an input file preceded by input options such as `-ss`
    pub fn input_with_args<I, S>(mut self, path: impl AsRef<Path>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.push(InputSpec {
            args: args.into_iter().map(Into::into).collect(),
            path: path.as_ref().to_path_buf(),
        });
        self
    }

    /// Add an output argument
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Select a stream or filter label for the output
    pub fn map(self, spec: impl Into<String>) -> Self {
        self.output_arg("-map").output_arg(spec)
    }

    /// Set filter complex
    pub fn filter_complex(self, graph: impl Into<String>) -> Self {
        self.output_arg("-filter_complex").output_arg(graph)
    }

    /// Apply codecs and thread count
    pub fn encode(self, settings: &EncodeSettings) -> Self {
        self.output_arg("-c:v")
            .output_arg(settings.video_codec.clone())
            .output_arg("-c:a")
            .output_arg(settings.audio_codec.clone())
            .output_arg("-threads")
            .output_arg(settings.threads.to_string())
    }

    /// Build the command arguments. Output is always overwritten and
    /// ffmpeg only reports errors.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec!["-y".to_string(), "-v".to_string(), "error".to_string()];

        for input in &self.inputs {
            args.extend(input.args.iter().cloned());
            args.push("-i".to_string());
            args.push(input.path.to_string_lossy().to_string());
        }

        args.extend(self.output_args.iter().cloned());
        args.push(self.output.to_string_lossy().to_string());

        args
    }

    /// Run to completion; `operation` names the step in errors
    pub async fn run(&self, operation: &str) -> ReelResult<()> {
        which::which(&self.program).map_err(|_| ReelError::ToolNotFound {
            tool: self.program.clone(),
        })?;

        let args = self.build_args();
        debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(ReelError::ffmpeg_failed(operation, &output.stderr));
        }

        Ok(())
    }
}
