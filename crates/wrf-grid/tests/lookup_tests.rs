//! Lookups against a curvilinear Lambert conformal domain.

use test_utils::{domains, points, GridArrays};
use wrf_grid::{
    find_direct_neighbors, find_grid_cells_in_radius, find_nearest_gridcell, haversine,
    select_cells, Coordinate, CurvilinearGrid, GridError, GridIndex, GridLocator, LocatorConfig,
};

fn to_grid(arrays: GridArrays) -> CurvilinearGrid {
    CurvilinearGrid::new(arrays.rows, arrays.cols, arrays.lon, arrays.lat).expect("valid grid")
}

fn alps() -> CurvilinearGrid {
    to_grid(domains::ALPS.grid())
}

fn inside_points() -> [(f64, f64); 3] {
    [points::CORTINA, points::BOLZANO, points::TRENTO]
}

// =============================================================================
// Nearest cell
// =============================================================================

#[test]
fn test_nearest_is_global_minimum() {
    let grid = alps();
    for (lon, lat) in inside_points() {
        let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
        for index in grid.indices() {
            let (x, y) = grid.coord(index).unwrap();
            assert!(
                nearest.distance <= haversine(lon, lat, x, y),
                "{} is closer than nearest {} for ({}, {})",
                index,
                nearest.index,
                lon,
                lat
            );
        }
    }
}

#[test]
fn test_nearest_within_half_diagonal() {
    let grid = alps();
    let half_diagonal = domains::ALPS.dx * std::f64::consts::SQRT_2 / 2.0;
    for (lon, lat) in inside_points() {
        let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
        assert!(
            nearest.distance < half_diagonal * 1.05,
            "distance {} for ({}, {})",
            nearest.distance,
            lon,
            lat
        );
    }
}

#[test]
fn test_nearest_on_cell_center_is_exact() {
    let grid = alps();
    let index = GridIndex::new(30, 70);
    let (lon, lat) = grid.coord(index).unwrap();
    let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
    assert_eq!(nearest.index, index);
    assert_eq!(nearest.distance, 0.0);
}

#[test]
fn test_nearest_outside_domain_lands_on_boundary() {
    let grid = alps();
    let (lon, lat) = points::PARIS;
    let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
    assert!(nearest.index.col == 0 || nearest.index.row == grid.rows() - 1);
    assert!(nearest.distance > 400_000.0);
}

#[test]
fn test_nearest_ignores_masked_cells() {
    let index = GridIndex::new(30, 70);
    let arrays = domains::ALPS.grid();
    let (lon, lat) = arrays.coord(index.row, index.col);
    let grid = to_grid(arrays.with_nan_cells(&[(index.row, index.col)]));

    let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
    assert_ne!(nearest.index, index);
    assert!(nearest.distance > 0.0);
    assert!(nearest.distance < domains::ALPS.dx * 1.05);
}

#[test]
fn test_nested_arrays_match_flat() {
    let arrays = domains::ALPS.grid();
    let (lon, lat) = arrays.to_nested();
    let nested = CurvilinearGrid::from_nested(lon, lat).unwrap();
    assert_eq!(nested, to_grid(arrays));
}

// =============================================================================
// Radius membership
// =============================================================================

#[test]
fn test_radius_membership_is_exact() {
    let grid = alps();
    let radius = 20_000.0;
    for (lon, lat) in inside_points() {
        let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
        let cells =
            find_grid_cells_in_radius(nearest.index, nearest.distance, radius, lon, lat, &grid)
                .unwrap();

        assert!(cells.contains(&nearest.index));
        for index in grid.indices() {
            let (x, y) = grid.coord(index).unwrap();
            let inside = haversine(lon, lat, x, y) <= radius;
            assert_eq!(cells.binary_search(&index).is_ok(), inside, "cell {}", index);
        }
    }
}

#[test]
fn test_radius_result_is_sorted_and_unique() {
    let grid = alps();
    let (lon, lat) = points::BOLZANO;
    let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
    let cells =
        find_grid_cells_in_radius(nearest.index, nearest.distance, 15_000.0, lon, lat, &grid)
            .unwrap();
    assert!(cells.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_radius_is_deterministic() {
    let grid = alps();
    let (lon, lat) = points::TRENTO;
    let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
    let first =
        find_grid_cells_in_radius(nearest.index, nearest.distance, 12_345.0, lon, lat, &grid)
            .unwrap();
    let second =
        find_grid_cells_in_radius(nearest.index, nearest.distance, 12_345.0, lon, lat, &grid)
            .unwrap();
    assert_eq!(first, second);
    assert_eq!(nearest, find_nearest_gridcell(&grid, lon, lat).unwrap());
}

#[test]
fn test_radius_not_exceeding_nearest_distance_fails() {
    let grid = alps();
    let (lon, lat) = points::CORTINA;
    let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
    for radius in [0.0, nearest.distance / 2.0, nearest.distance] {
        let result =
            find_grid_cells_in_radius(nearest.index, nearest.distance, radius, lon, lat, &grid);
        assert!(matches!(result, Err(GridError::InvalidRadius { .. })));
    }
}

#[test]
fn test_seeded_search_matches_full_scan() {
    let grid = alps();
    let seeded = GridLocator::with_config(
        &grid,
        LocatorConfig {
            seed_with_neighbors: true,
            ..Default::default()
        },
    )
    .unwrap();

    for (lon, lat) in inside_points() {
        let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
        for radius in [5_000.0, 10_000.0, 20_000.0, 50_000.0] {
            let full =
                find_grid_cells_in_radius(nearest.index, nearest.distance, radius, lon, lat, &grid)
                    .unwrap();
            let fast = seeded
                .cells_in_radius(nearest.index, nearest.distance, radius, lon, lat)
                .unwrap();
            assert_eq!(full, fast, "radius {} at ({}, {})", radius, lon, lat);
        }
    }
}

#[test]
fn test_direct_neighbors_cover_radius_members() {
    let grid = alps();
    let (lon, lat) = points::CORTINA;
    let nearest = find_nearest_gridcell(&grid, lon, lat).unwrap();
    let candidates = find_direct_neighbors(nearest.index, 10_000.0, lon, lat, &grid).unwrap();
    let members =
        find_grid_cells_in_radius(nearest.index, nearest.distance, 10_000.0, lon, lat, &grid)
            .unwrap();

    assert!(candidates.len() >= members.len());
    assert!(members.iter().all(|index| candidates.contains(index)));
}

// =============================================================================
// Parallel evaluation
// =============================================================================

#[test]
fn test_parallel_and_serial_agree_on_large_grid() {
    let grid = to_grid(domains::ALPS_1KM_LARGE.grid());
    let parallel = GridLocator::new(&grid);
    assert!(parallel.config().use_parallel(grid.len()));

    let serial = GridLocator::with_config(
        &grid,
        LocatorConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        },
    )
    .unwrap();

    let (lon, lat) = points::BOLZANO;
    let a = parallel.nearest(lon, lat).unwrap();
    let b = serial.nearest(lon, lat).unwrap();
    assert_eq!(a, b);

    let cells_a = parallel
        .cells_in_radius(a.index, a.distance, 8_000.0, lon, lat)
        .unwrap();
    let cells_b = serial
        .cells_in_radius(b.index, b.distance, 8_000.0, lon, lat)
        .unwrap();
    assert_eq!(cells_a, cells_b);
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_selection_reports_cell_attributes() {
    let grid = alps();
    let (lon, lat) = points::BOLZANO;
    let selection = select_cells(&grid, Coordinate::new(lon, lat), Some(6_000.0)).unwrap();

    assert!(selection.is_multi_cell());
    for cell in &selection.cells {
        let (x, y) = grid.coord(cell.index).unwrap();
        assert_eq!((cell.lon, cell.lat), (x, y));
        assert_eq!(cell.distance, haversine(lon, lat, x, y));
        assert!(cell.distance <= 6_000.0);
    }
}
