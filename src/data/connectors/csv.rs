use crate::error::{LapOptError, Result};
use crate::types::Point;
use polars::prelude::*;
use std::path::{Path, PathBuf};

const X_ALIASES: [&str; 2] = ["x", "X"];
const Y_ALIASES: [&str; 2] = ["y", "Y"];

pub struct WaypointLoader;

impl WaypointLoader {
    /// Load CSV file into DataFrame
    pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| LapOptError::TrackLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load waypoints from a CSV with an `x,y` header.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
        let df = Self::load_frame(&path)?;
        let points = Self::from_frame(&df)?;
        log::info!(
            "Loaded {} waypoints from {}",
            points.len(),
            path.as_ref().display()
        );
        Ok(points)
    }

    pub fn from_frame(df: &DataFrame) -> Result<Vec<Point>> {
        let x_name = Self::find_column(df, &X_ALIASES)?;
        let y_name = Self::find_column(df, &Y_ALIASES)?;

        let xs = df.column(x_name)?.cast(&DataType::Float64)?;
        let ys = df.column(y_name)?.cast(&DataType::Float64)?;
        let xs = xs.f64()?;
        let ys = ys.f64()?;

        xs.into_iter()
            .zip(ys.into_iter())
            .enumerate()
            .map(|(row, (x, y))| match (x, y) {
                (Some(x), Some(y)) => Ok(Point::new(x, y)),
                _ => Err(LapOptError::TrackLoading(format!(
                    "Missing coordinate in row {}",
                    row
                ))),
            })
            .collect()
    }

    /// Find column by checking aliases
    fn find_column<'a>(df: &DataFrame, aliases: &[&'a str]) -> Result<&'a str> {
        let columns = df.get_column_names();
        aliases
            .iter()
            .copied()
            .find(|alias| columns.iter().any(|col| col.as_str() == *alias))
            .ok_or_else(|| {
                LapOptError::TrackLoading(format!(
                    "Missing required column (tried aliases: {:?})",
                    aliases
                ))
            })
    }
}

/// `*.csv` files in `directory`, sorted by file name.
pub fn list_tracks<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>> {
    let mut tracks: Vec<PathBuf> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map_or(false, |ext| ext == "csv"))
        .collect();
    tracks.sort();
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_from_frame() {
        let df = df! {
            "x" => &[0.0, 10.0, 10.0, 0.0],
            "y" => &[0.0, 0.0, 5.0, 5.0],
        }
        .unwrap();

        let points = WaypointLoader::from_frame(&df).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[2], Point::new(10.0, 5.0));
    }

    #[test]
    fn test_integer_columns_and_aliases() {
        let df = df! {
            "X" => &[0i64, 3, 3],
            "Y" => &[0i64, 0, 4],
        }
        .unwrap();

        let points = WaypointLoader::from_frame(&df).unwrap();
        assert_eq!(points[2], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_missing_column() {
        let df = df! {
            "x" => &[0.0, 1.0],
            "z" => &[0.0, 1.0],
        }
        .unwrap();

        assert!(matches!(
            WaypointLoader::from_frame(&df),
            Err(LapOptError::TrackLoading(_))
        ));
    }

    #[test]
    fn test_null_coordinate() {
        let df = df! {
            "x" => &[Some(0.0), None, Some(2.0)],
            "y" => &[Some(0.0), Some(1.0), Some(2.0)],
        }
        .unwrap();

        assert!(WaypointLoader::from_frame(&df).is_err());
    }
}
