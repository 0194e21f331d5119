//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use chemgrid_calendar::{FilenameFormat, TimestampStyle};
use chemgrid_catalog::{FileSequence, LinkMode, RemapConfig};
use chemgrid_emissions::{ScaleConfig, SpeciesSelection};
use chemgrid_regrid::{GridPreset, LatLonGrid, RegridConfig};

use crate::config::*;

/// Parses a timestamp style name into the corresponding enum variant.
pub fn parse_style(s: &str) -> Result<TimestampStyle> {
    match s.to_lowercase().as_str() {
        "underscore" | "wrf" | "nei" => Ok(TimestampStyle::Underscore),
        "iso_t" | "iso" | "cams" => Ok(TimestampStyle::IsoT),
        other => bail!("unknown timestamp style: {other:?}"),
    }
}

/// Parses a link mode name into the corresponding enum variant.
pub fn parse_link_mode(s: &str) -> Result<LinkMode> {
    match s.to_lowercase().as_str() {
        "symlink" | "link" => Ok(LinkMode::Symlink),
        "copy" => Ok(LinkMode::Copy),
        other => bail!("unknown link mode: {other:?}"),
    }
}

/// Parses a target grid preset name into the corresponding enum variant.
pub fn parse_preset(s: &str) -> Result<GridPreset> {
    match s.to_lowercase().as_str() {
        "conus-1deg" | "conus_1deg" => Ok(GridPreset::Conus1Deg),
        "conus-0125deg" | "conus_0125deg" => Ok(GridPreset::Conus0125Deg),
        other => bail!("unknown grid preset: {other:?}"),
    }
}

/// Builds a [`FilenameFormat`] from the TOML shift configuration.
pub fn build_filename_format(shift: &ShiftToml) -> Result<FilenameFormat> {
    let style = parse_style(&shift.style)?;
    Ok(FilenameFormat::default()
        .with_prefix_len(shift.prefix_len)
        .with_output_prefix(shift.output_prefix.as_deref())
        .with_style(style))
}

/// Builds a [`FileSequence`] from the TOML missing-file configuration.
pub fn build_missing_sequence(missing: &MissingToml) -> Result<FileSequence> {
    let dir = missing
        .dir
        .clone()
        .context("no directory: set [missing].dir in config or use --dir")?;
    let seq = FileSequence::new(dir, &missing.prefix)
        .with_style(parse_style(&missing.style)?)
        .with_suffix(&missing.suffix);
    seq.validate()?;
    Ok(seq)
}

/// Builds a [`RemapConfig`] and its [`LinkMode`] from the TOML locate
/// configuration.
///
/// The target files share the source prefix unless `output_prefix` is set.
pub fn build_remap_config(locate: &LocateToml) -> Result<(RemapConfig, LinkMode)> {
    let reference_year = locate
        .reference_year
        .context("no reference year: set [locate].reference_year or use --reference-year")?;
    let source_dir = required_dir(&locate.source_dir, "source", "--source-dir")?;
    let output_dir = required_dir(&locate.output_dir, "output", "--output-dir")?;
    let style = parse_style(&locate.style)?;

    let target_prefix = locate.output_prefix.as_deref().unwrap_or(&locate.prefix);
    let source = FileSequence::new(source_dir, &locate.prefix)
        .with_style(style)
        .with_suffix(&locate.suffix);
    let target = FileSequence::new(output_dir, target_prefix)
        .with_style(style)
        .with_suffix(&locate.suffix);

    let config = RemapConfig::new(source, target, reference_year);
    config.validate()?;
    Ok((config, parse_link_mode(&locate.mode)?))
}

fn required_dir(dir: &Option<PathBuf>, what: &str, flag: &str) -> Result<PathBuf> {
    match dir {
        Some(d) => Ok(d.clone()),
        None => bail!("no {what} directory: set [locate].{what}_dir in config or use {flag}"),
    }
}

/// Builds a [`ScaleConfig`] from the TOML scale configuration.
pub fn build_scale_config(scale: &ScaleToml) -> Result<ScaleConfig> {
    let input_dir = scale
        .input_dir
        .clone()
        .context("no input directory: set [scale].input_dir or use --input-dir")?;
    let mask_file = scale
        .mask_file
        .clone()
        .context("no mask file: set [scale].mask_file or use --mask-file")?;
    let mask_name = scale
        .mask_name
        .clone()
        .context("no mask name: set [scale].mask_name or use --mask")?;
    let factor = scale
        .factor
        .context("no scale factor: set [scale].factor or use --factor")?;

    let cfg = ScaleConfig::new(input_dir, mask_file, mask_name, factor)
        .with_species(SpeciesSelection::parse(&scale.species))
        .with_output_dir(scale.output_dir.as_ref())
        .with_file_template(&scale.file_template)
        .with_grid_tag(&scale.grid_tag)
        .with_column_dim(&scale.column_dim)
        .with_skip_vars(scale.skip_vars.iter().cloned());
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`RegridConfig`] from the TOML regrid configuration.
///
/// A `[regrid.grid]` table replaces the preset's axes but keeps its output
/// prefix unless `output_prefix` is also set.
pub fn build_regrid_config(regrid: &RegridToml) -> Result<RegridConfig> {
    let preset = parse_preset(&regrid.preset)?;
    let mut cfg = match &regrid.grid {
        Some(g) => {
            let grid = LatLonGrid::new(g.lat_start, g.lat_end, g.lon_start, g.lon_end, g.resolution)?;
            RegridConfig::new(grid, regrid.variables.iter().cloned())
                .with_output_prefix(preset.output_prefix())
        }
        None => RegridConfig::from_preset(preset, regrid.variables.iter().cloned()),
    };
    cfg = cfg
        .with_level_index(regrid.level_index)
        .with_column_dim(&regrid.column_dim);
    if let Some(prefix) = &regrid.output_prefix {
        cfg = cfg.with_output_prefix(prefix);
    }
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn styles() {
        assert_eq!(parse_style("Underscore").unwrap(), TimestampStyle::Underscore);
        assert_eq!(parse_style("iso_t").unwrap(), TimestampStyle::IsoT);
        assert!(parse_style("slash").is_err());
    }

    #[test]
    fn link_modes() {
        assert_eq!(parse_link_mode("copy").unwrap(), LinkMode::Copy);
        assert_eq!(parse_link_mode("symlink").unwrap(), LinkMode::Symlink);
        assert!(parse_link_mode("hardlink").is_err());
    }

    #[test]
    fn presets() {
        assert_eq!(parse_preset("conus-0125deg").unwrap(), GridPreset::Conus0125Deg);
        assert!(parse_preset("global-1deg").is_err());
    }

    #[test]
    fn filename_format_from_defaults() {
        let fmt = build_filename_format(&ShiftToml::default()).unwrap();
        assert_eq!(fmt.prefix_len(), 13);
        assert_eq!(fmt.output_prefix(), None);
        assert_eq!(fmt.style(), TimestampStyle::Underscore);
    }

    #[test]
    fn missing_requires_dir() {
        let err = build_missing_sequence(&MissingToml::default()).unwrap_err();
        assert!(err.to_string().contains("--dir"));
    }

    #[test]
    fn remap_uses_output_prefix_for_targets() {
        let locate = LocateToml {
            reference_year: Some(2017),
            source_dir: Some("/nei2017".into()),
            output_dir: Some("/nei2020".into()),
            output_prefix: Some("wrfchemi_d02".into()),
            ..LocateToml::default()
        };
        let (cfg, mode) = build_remap_config(&locate).unwrap();
        assert_eq!(mode, LinkMode::Symlink);
        assert_eq!(cfg.reference_year(), 2017);
        assert_eq!(cfg.source().prefix(), "wrfchemi_d01");
        assert_eq!(cfg.target().prefix(), "wrfchemi_d02");
        assert_eq!(cfg.target().dir(), Path::new("/nei2020"));
    }

    #[test]
    fn remap_requires_reference_year() {
        let locate = LocateToml {
            source_dir: Some("/a".into()),
            output_dir: Some("/b".into()),
            ..LocateToml::default()
        };
        assert!(build_remap_config(&locate).is_err());
    }

    #[test]
    fn scale_config_from_toml() {
        let scale = ScaleToml {
            species: "CO".into(),
            factor: Some(0.7),
            mask_file: Some("/m.nc".into()),
            mask_name: Some("mask_Quebec".into()),
            input_dir: Some("/qfed".into()),
            ..ScaleToml::default()
        };
        let cfg = build_scale_config(&scale).unwrap();
        assert_eq!(cfg.species(), &SpeciesSelection::Single("CO".into()));
        assert_eq!(
            cfg.output_dir(),
            PathBuf::from("/qfed/ne0conus30x8_mask_QuebecMasked_70pct")
        );
    }

    #[test]
    fn scale_rejects_negative_factor() {
        let scale = ScaleToml {
            factor: Some(-1.0),
            mask_file: Some("/m.nc".into()),
            mask_name: Some("mask_Quebec".into()),
            input_dir: Some("/qfed".into()),
            ..ScaleToml::default()
        };
        assert!(build_scale_config(&scale).is_err());
    }

    #[test]
    fn regrid_custom_grid_keeps_preset_prefix() {
        let regrid = RegridToml {
            variables: vec!["O3".into()],
            grid: Some(GridToml {
                lat_start: 20.0,
                lat_end: 50.0,
                lon_start: 230.0,
                lon_end: 300.0,
                resolution: 0.5,
            }),
            ..RegridToml::default()
        };
        let cfg = build_regrid_config(&regrid).unwrap();
        assert_eq!(cfg.output_prefix(), "CONUSRegrid1_");
        assert_eq!(cfg.grid().lats().len(), 61);
        assert_eq!(cfg.grid().lons().len(), 141);
    }

    #[test]
    fn regrid_requires_variables() {
        assert!(build_regrid_config(&RegridToml::default()).is_err());
    }
}
