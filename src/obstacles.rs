//! Loads obstacle cells from a CSV file: a header row, then one `x,y` pair per row.
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ObstacleError;
use crate::obstacle_grid::ObstacleGrid;
use crate::Cell;

#[derive(Debug, Deserialize)]
struct ObstacleRecord {
    x: i64,
    y: i64,
}

/// Reads the obstacle file at `path` into a `size` by `size` grid.
pub fn load_obstacles<P: AsRef<Path>>(path: P, size: usize) -> Result<ObstacleGrid, ObstacleError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ObstacleError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loading obstacles from {}", path.display());
    read_obstacles(file, size)
}

/// Parses obstacle rows from any reader. The first row is a header and is skipped. Rows must
/// hold two integers inside the grid; repeated cells are accepted.
pub fn read_obstacles<R: Read>(reader: R, size: usize) -> Result<ObstacleGrid, ObstacleError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut obstacle_grid = ObstacleGrid::new(size);
    let mut record = StringRecord::new();
    let mut rows = 0;
    while csv_reader.read_record(&mut record)? {
        // Fields are taken by position, whatever the header says.
        let ObstacleRecord { x, y } = record.deserialize(None)?;
        let line = record.position().map_or(0, |p| p.line());
        let in_range = |v: i64| v >= 0 && (v as u64) < size as u64;
        if !in_range(x) || !in_range(y) {
            return Err(ObstacleError::OutOfRange { line, x, y, size });
        }
        obstacle_grid.set(Cell::new(x as i32, y as i32), true);
        rows += 1;
    }
    obstacle_grid.update();
    debug!(
        "Read {} obstacle rows, {} distinct cells",
        rows,
        obstacle_grid.obstacles().count()
    );
    Ok(obstacle_grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &str) -> Result<ObstacleGrid, ObstacleError> {
        read_obstacles(data.as_bytes(), 10)
    }

    #[test]
    fn reads_rows_after_header() {
        let grid = read("x,y\n5,0\n5, 1\n 0 ,9\n").unwrap();
        let obstacles = grid.obstacles().collect::<Vec<_>>();
        assert_eq!(
            obstacles,
            vec![Cell::new(5, 0), Cell::new(5, 1), Cell::new(0, 9)]
        );
        assert!(grid.is_blocked(Cell::new(0, 9)));
        assert!(!grid.is_blocked(Cell::new(9, 0)));
    }

    #[test]
    fn header_names_are_ignored() {
        let grid = read("column_a,column_b\n2,3\n").unwrap();
        assert!(grid.is_blocked(Cell::new(2, 3)));
    }

    #[test]
    fn duplicates_are_accepted() {
        let grid = read("x,y\n4,4\n4,4\n").unwrap();
        assert_eq!(grid.obstacles().count(), 1);
    }

    #[test]
    fn empty_input_has_no_obstacles() {
        assert_eq!(read("").unwrap().obstacles().count(), 0);
        assert_eq!(read("x,y\n").unwrap().obstacles().count(), 0);
    }

    #[test]
    fn components_are_current_after_loading() {
        let data = (0..10).fold(String::from("x,y\n"), |acc, y| acc + &format!("5,{y}\n"));
        let grid = read(&data).unwrap();
        assert!(!grid.components_dirty);
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(9, 9)));
    }

    #[test]
    fn out_of_range_rows_are_rejected() {
        match read("x,y\n1,1\n10,3\n") {
            Err(ObstacleError::OutOfRange { line, x, y, size }) => {
                assert_eq!((line, x, y, size), (3, 10, 3, 10));
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(matches!(
            read("x,y\n-1,0\n"),
            Err(ObstacleError::OutOfRange { x: -1, .. })
        ));
    }

    #[test]
    fn non_integer_fields_are_malformed() {
        assert!(matches!(
            read("x,y\n1.5,2\n"),
            Err(ObstacleError::Malformed(_))
        ));
        assert!(matches!(
            read("x,y\nfoo,bar\n"),
            Err(ObstacleError::Malformed(_))
        ));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        assert!(matches!(
            read("x,y\n1,2,3\n"),
            Err(ObstacleError::Malformed(_))
        ));
        assert!(matches!(read("x,y\n1\n"), Err(ObstacleError::Malformed(_))));
    }

    #[test]
    fn missing_file_cannot_be_opened() {
        let err = load_obstacles("does/not/exist/obstacle.csv", 10).unwrap_err();
        assert!(matches!(err, ObstacleError::Open { .. }));
        assert!(err.to_string().contains("does/not/exist/obstacle.csv"));
    }
}
