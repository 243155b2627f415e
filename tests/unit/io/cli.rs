//! Tests for command-line parsing and batch mosaic processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use seedmosaic::MosaicError;
    use seedmosaic::io::cli::{Cli, MosaicProcessor, OutputFormat, random_seed, sanitize_seed};
    use seedmosaic::io::configuration::{DEFAULT_ROWS, DEFAULT_SEED, RANDOM_SEED_LENGTH};
    use seedmosaic::io::settings::{PlanDocument, Settings};
    use seedmosaic::math::random::Mulberry32;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn temp_dir() -> TempDir {
        TempDir::new().unwrap_or_else(|_| unreachable!("temp dir"))
    }

    // Tests parsing with only the tile directory
    // Verified by changing default values
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "tiles"]);

        assert_eq!(cli.tiles, PathBuf::from("tiles"));
        assert_eq!(cli.output, PathBuf::from("."));
        assert!(cli.seeds.is_empty());
        assert_eq!(cli.random_seeds, 0);
        assert_eq!(cli.format, OutputFormat::Png);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
        assert!(!cli.plan);
    }

    // Tests every flag reaches its field
    // Verified by swapping the short flags for rows and columns
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program", "tiles", "-o", "out", "-s", "a", "--seed", "b", "--random-seeds", "3",
            "-r", "7", "-c", "9", "-u", "32", "-b", "#fff", "--rotation", "false", "--flips",
            "true", "--clustering", "false", "-F", "both", "-p", "-q", "-n",
        ]);

        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.seeds, vec!["a", "b"]);
        assert_eq!(cli.random_seeds, 3);
        assert_eq!((cli.rows, cli.cols, cli.unit), (Some(7), Some(9), Some(32)));
        assert_eq!(cli.background.as_deref(), Some("#fff"));
        assert_eq!(cli.rotation, Some(false));
        assert_eq!(cli.flips, Some(true));
        assert_eq!(cli.clustering, Some(false));
        assert_eq!(cli.format, OutputFormat::Both);
        assert!(cli.plan);
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["program", "tiles", "--rows", "many"]).is_err());
        assert!(Cli::try_parse_from(["program", "tiles", "--flips", "maybe"]).is_err());
        assert!(Cli::try_parse_from(["program"]).is_err());
    }

    // Tests flags override a loaded settings file
    // Verified by applying the file after the flags
    #[test]
    fn test_effective_settings_merges_file_and_flags() {
        let dir = temp_dir();
        let path = dir.path().join("settings.json");
        let stored = Settings {
            rows: 12,
            cols: 3,
            seed: "stored".to_string(),
            ..Settings::default()
        };
        assert!(stored.save(&path).is_ok());

        let path_arg = path.to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "program", "tiles", "--settings", &path_arg, "-c", "6", "--flips", "true", "-s",
            "fresh",
        ]);
        let Ok(settings) = cli.effective_settings() else {
            unreachable!("settings should load");
        };

        assert_eq!(settings.rows, 12);
        assert_eq!(settings.cols, 6);
        assert!(settings.options.allow_flips);
        assert_eq!(settings.seed, "fresh");
    }

    #[test]
    fn test_effective_settings_defaults() {
        let cli = Cli::parse_from(["program", "tiles"]);
        let settings = cli.effective_settings().unwrap_or_default();
        assert_eq!(settings.rows, DEFAULT_ROWS);
        assert_eq!(cli.seed_list(&settings), vec![DEFAULT_SEED.to_string()]);
    }

    #[test]
    fn test_seed_list_order() {
        let cli = Cli::parse_from(["program", "tiles", "-s", "x", "-s", "y", "--random-seeds", "2"]);
        let seeds = cli.seed_list(&Settings::default());

        assert_eq!(seeds.len(), 4);
        assert_eq!(seeds.get(..2), Some(&["x".to_string(), "y".to_string()][..]));
        assert!(seeds
            .iter()
            .skip(2)
            .all(|seed| seed.len() == RANDOM_SEED_LENGTH));
    }

    #[test]
    fn test_random_seed_is_alphanumeric_and_reproducible() {
        let first = random_seed(&mut Mulberry32::new(9));
        let second = random_seed(&mut Mulberry32::new(9));
        assert_eq!(first, second);
        assert_eq!(first.len(), RANDOM_SEED_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_sanitize_seed() {
        assert_eq!(sanitize_seed("pattern-2024"), "pattern-2024");
        assert_eq!(sanitize_seed("a b/c.d"), "a_b_c_d");
        assert_eq!(sanitize_seed("é"), "_");
        assert_eq!(sanitize_seed(""), "empty");
    }

    #[test]
    fn test_output_format_extensions() {
        assert_eq!(OutputFormat::Png.extensions(), ["png"]);
        assert_eq!(OutputFormat::Svg.extensions(), ["svg"]);
        assert_eq!(OutputFormat::Both.extensions(), ["png", "svg"]);
    }

    fn write_tiles(dir: &Path) {
        for (name, side, color) in [
            ("sun", 10, Rgba([250, 200, 0, 255])),
            ("sea", 10, Rgba([0, 80, 200, 255])),
            ("hill", 20, Rgba([20, 160, 60, 255])),
        ] {
            let image = RgbaImage::from_pixel(side, side, color);
            assert!(image.save(dir.join(format!("{name}.png"))).is_ok());
        }
    }

    fn processor_args<'a>(tiles: &'a str, output: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
        let mut args = vec![
            "program", tiles, "-o", output, "-u", "10", "-r", "4", "-c", "5", "-q", "-s", "one",
            "-s", "two words",
        ];
        args.extend_from_slice(extra);
        args
    }

    // Tests a full batch run writes every artifact and skips on rerun
    // Verified by ignoring the skip check
    #[test]
    fn test_processor_writes_and_skips() {
        let tiles = temp_dir();
        let output = temp_dir();
        write_tiles(tiles.path());
        let tiles_arg = tiles.path().to_string_lossy().into_owned();
        let output_arg = output.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from(processor_args(&tiles_arg, &output_arg, &["-F", "both", "-p"]));
        let Ok(mut processor) = MosaicProcessor::new(cli) else {
            unreachable!("processor should build");
        };
        assert!(processor.progress_handle().is_none());
        assert_eq!(processor.output_directory(), output.path());

        let Ok(written) = processor.process() else {
            unreachable!("processing should succeed");
        };
        assert_eq!(written.len(), 6);
        assert!(written.iter().all(|path| path.exists()));

        let png = output.path().join("mosaic_two_words.png");
        let dimensions = image::image_dimensions(&png).ok();
        assert_eq!(dimensions, Some((50, 40)));

        let plan = PlanDocument::load(&output.path().join("mosaic_one_plan.json"));
        assert!(plan.is_ok_and(|plan| plan.seed == "one" && !plan.placements.is_empty()));

        let cli = Cli::parse_from(processor_args(&tiles_arg, &output_arg, &["-F", "both"]));
        let rerun = MosaicProcessor::new(cli).and_then(|mut p| p.process());
        assert!(rerun.is_ok_and(|paths| paths.is_empty()));

        let cli = Cli::parse_from(processor_args(&tiles_arg, &output_arg, &["-F", "svg", "-n"]));
        let forced = MosaicProcessor::new(cli).and_then(|mut p| p.process());
        assert!(forced.is_ok_and(|paths| paths.len() == 2));
    }

    // Tests a seed is regenerated while any requested artifact is missing
    // Verified by skipping as soon as the first artifact exists
    #[test]
    fn test_processor_fills_in_missing_artifacts() {
        let tiles = temp_dir();
        let output = temp_dir();
        write_tiles(tiles.path());
        let tiles_arg = tiles.path().to_string_lossy().into_owned();
        let output_arg = output.path().to_string_lossy().into_owned();

        let run = |extra: &[&str]| {
            let cli = Cli::parse_from(processor_args(&tiles_arg, &output_arg, extra));
            MosaicProcessor::new(cli)
                .and_then(|mut p| p.process())
                .map(|paths| paths.len())
                .ok()
        };

        assert_eq!(run(&["-F", "png"]), Some(2));
        assert!(!output.path().join("mosaic_one.svg").exists());

        assert_eq!(run(&["-F", "both"]), Some(4));
        assert!(output.path().join("mosaic_one.svg").exists());

        assert_eq!(run(&["-F", "both", "-p"]), Some(6));
        assert!(output.path().join("mosaic_two_words_plan.json").exists());

        assert_eq!(run(&["-F", "both", "-p"]), Some(0));
        assert_eq!(run(&["-F", "svg"]), Some(0));
    }

    #[test]
    fn test_processor_saves_settings() {
        let tiles = temp_dir();
        let output = temp_dir();
        write_tiles(tiles.path());
        let tiles_arg = tiles.path().to_string_lossy().into_owned();
        let output_arg = output.path().to_string_lossy().into_owned();
        let settings_path = output.path().join("saved.json");
        let settings_arg = settings_path.to_string_lossy().into_owned();

        let cli = Cli::parse_from(processor_args(
            &tiles_arg,
            &output_arg,
            &["--save-settings", &settings_arg],
        ));
        let result = MosaicProcessor::new(cli).and_then(|mut p| p.process());
        assert!(result.is_ok());

        let saved = Settings::load(&settings_path);
        assert!(saved.is_ok_and(|s| s.rows == 4 && s.cols == 5 && s.seed == "one"));
    }

    #[test]
    fn test_processor_rejects_empty_tile_directory() {
        let tiles = temp_dir();
        let output = temp_dir();
        let tiles_arg = tiles.path().to_string_lossy().into_owned();
        let output_arg = output.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from(processor_args(&tiles_arg, &output_arg, &[]));
        let result = MosaicProcessor::new(cli).and_then(|mut p| p.process());
        assert!(matches!(result, Err(MosaicError::EmptyCatalog { .. })));
    }

    #[test]
    fn test_processor_rejects_bad_background() {
        let tiles = temp_dir();
        let output = temp_dir();
        write_tiles(tiles.path());
        let tiles_arg = tiles.path().to_string_lossy().into_owned();
        let output_arg = output.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from(processor_args(&tiles_arg, &output_arg, &["-b", "teal"]));
        let result = MosaicProcessor::new(cli).and_then(|mut p| p.process());
        assert!(matches!(result, Err(MosaicError::InvalidParameter { .. })));
    }
}
