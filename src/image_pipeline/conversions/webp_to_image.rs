use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    common::timing::PipelineTimings,
    encode::{ConversionConfig, ImageWriter, OutputFormat, StandardImageWriter},
    webp::{CompressedImage, DecodedImage, LibwebpDecoder, PixelLayout, WebPDecoder},
};

pub struct WebPConversionPipeline<D: WebPDecoder, W: ImageWriter> {
    decoder: D,
    writer: W,
    config: ConversionConfig,
}

impl WebPConversionPipeline<LibwebpDecoder, StandardImageWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            decoder: LibwebpDecoder,
            writer: StandardImageWriter,
            config,
        }
    }
}

impl<D: WebPDecoder, W: ImageWriter> WebPConversionPipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: ConversionConfig) -> Self {
        Self {
            decoder,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width as usize, height as usize));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(ConversionError::InvalidDimensions(width as usize, height as usize));
            }
        }

        Ok(())
    }

    /// Reads and validates a WebP file, honoring the configured size limit.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<CompressedImage> {
        CompressedImage::open_with_max_size(path, self.config.max_input_size)
    }

    /// Decodes `image` to RGBA if its bitstream carries alpha, RGB otherwise.
    ///
    /// Animated images are rejected before the decoder is invoked.
    pub fn decode(&self, image: &CompressedImage) -> Result<DecodedImage> {
        let features = image.features();
        if features.has_animation {
            warn!("Refusing to decode animated WebP image");
            return Err(ConversionError::UnsupportedAnimation);
        }

        self.validate_dimensions(features.width, features.height)?;

        let layout = PixelLayout::for_alpha(features.has_alpha);
        self.decoder.decode(image, layout)
    }

    /// Encodes an already decoded image in `format`.
    pub fn encode(
        &self,
        decoded: &DecodedImage,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<()> {
        let raster = decoded.raster();
        match format {
            OutputFormat::Png => self.writer.write_png(&raster, output, &self.config),
            OutputFormat::Jpeg => self.writer.write_jpeg(&raster, output, &self.config),
        }
    }

    #[instrument(skip(self, image, output), fields(input_size = image.len()))]
    pub fn convert(
        &self,
        image: &CompressedImage,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<()> {
        info!("Starting WebP to {} conversion", format);

        let decoded = {
            let _span = tracing::info_span!("decode_webp").entered();
            self.decode(image)?
        };

        {
            let _span = tracing::info_span!("encode_image", %format).entered();
            self.encode(&decoded, format, output)?;
        }

        info!(
            width = decoded.width(),
            height = decoded.height(),
            "Conversion complete"
        );
        Ok(())
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        format: OutputFormat,
    ) -> Result<()> {
        let timings = self.convert_file_with_timings(input_path, output_path, format)?;
        debug!(
            "Conversion took {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    /// Converts `input_path` into `output_path`.
    ///
    /// The output file is only created once decoding has succeeded, and it is
    /// removed again if encoding fails.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        format: OutputFormat,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let image = timings.measure("read_input_file", || {
            let _span = tracing::info_span!("read_input_file").entered();
            self.open(input_path)
        })?;

        let decoded = timings.measure("decode_webp", || {
            let _span = tracing::info_span!("decode_webp").entered();
            self.decode(&image)
        })?;

        let file = timings
            .measure("create_output_file", || {
                let _span = tracing::info_span!("create_output_file").entered();
                File::create(output_path)
            })
            .map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        let mut output = BufWriter::new(file);

        let step = match format {
            OutputFormat::Png => "encode_png",
            OutputFormat::Jpeg => "encode_jpeg",
        };
        let written = timings.measure(step, || {
            let _span = tracing::info_span!("encode_image", %format).entered();
            self.encode(&decoded, format, &mut output)?;
            output.flush().map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })
        });

        if let Err(e) = written {
            drop(output);
            if let Err(remove_err) = std::fs::remove_file(output_path) {
                warn!(
                    "Failed to remove partial output {}: {}",
                    output_path.display(),
                    remove_err
                );
            }
            return Err(e);
        }

        info!(
            width = decoded.width(),
            height = decoded.height(),
            "Conversion complete"
        );
        Ok(timings)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
