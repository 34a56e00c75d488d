use super::{Col, Row, cols, four_cols, rows};
use crate::dense_map::DoubleMap;
use crate::dense_matrix::DenseMatrix;
use crate::error::ShapeError;

/// The matrix used throughout:
/// ```text
///     A  B  C  D
///  X  1  2  3  4
///  Y  5  6  7  8
///  Z  9 10 11 12
/// ```
fn filled() -> DenseMatrix<Col, Row> {
    let mut m = DenseMatrix::new(four_cols(), rows());
    m.put_row_major(&[
        1.0, 2.0, 3.0, 4.0, //
        5.0, 6.0, 7.0, 8.0, //
        9.0, 10.0, 11.0, 12.0,
    ])
    .unwrap();
    m
}

#[test]
fn test_basic_operations() {
    let mut d = filled();

    assert_eq!(d.get(&Col::B, &Row::Y), 6.0);
    assert_eq!(d.get(&Col::D, &Row::Z), 12.0);
    assert_eq!(d.col_total(&Col::A), 15.0);
    assert_eq!(d.col_average(&Col::A), 5.0);
    assert_eq!(d.col_average(&Col::B), 6.0);
    assert_eq!(d.row_total(&Row::X), 10.0);
    assert_eq!(d.total(), 78.0);
    assert_eq!(d.average(), 78.0 / 12.0);

    let mut ones = DenseMatrix::new(four_cols(), rows());
    ones.put_row_major(&[1.0; 12]).unwrap();
    ones.add_into(&mut d).unwrap();

    // no explicit cache clear needed: mutation alone re-dirties
    assert_eq!(d.get(&Col::B, &Row::Y), 7.0);
    assert_eq!(d.get(&Col::D, &Row::Z), 13.0);
    assert_eq!(d.col_total(&Col::A), 18.0);
    assert_eq!(d.col_average(&Col::A), 6.0);
    assert_eq!(d.col_average(&Col::B), 7.0);
    assert_eq!(d.row_total(&Row::X), 14.0);
}

#[test]
fn test_weighted_totals() {
    let mut d = filled();

    // no weightings attached: weights default to 1 on both axes
    assert_eq!(d.weighted_row_total(&Row::X), 10.0);

    let zero_weights = DoubleMap::new(four_cols());
    d.set_column_weightings(zero_weights).unwrap();
    assert_eq!(d.weighted_row_total(&Row::X), 0.0);

    let mut col_weights = DoubleMap::new(four_cols());
    col_weights.put(&Col::A, 2.0);
    d.set_column_weightings(col_weights).unwrap();
    assert_eq!(d.weighted_row_total(&Row::X), 2.0);
    assert_eq!(d.weighted_col_total(&Col::A), 2.0 * 15.0);
    assert_eq!(d.weighted_col_total(&Col::B), 0.0);

    // attaching a weighting must not disturb the unweighted family
    assert_eq!(d.row_total(&Row::X), 10.0);
    assert_eq!(d.col_total(&Col::A), 15.0);
}

#[test]
fn test_row_weightings_combine_with_column_weightings() {
    let mut d = filled();

    let mut row_weights = DoubleMap::new(rows());
    row_weights.put(&Row::X, 1.0);
    row_weights.put(&Row::Y, 0.5);
    d.set_row_weightings(row_weights).unwrap();

    // col A: 1*1 + 5*0.5 + 9*0 = 3.5
    assert_eq!(d.weighted_col_total(&Col::A), 3.5);

    let mut col_weights = DoubleMap::new(four_cols());
    col_weights.put(&Col::A, 2.0);
    d.set_column_weightings(col_weights).unwrap();
    assert_eq!(d.weighted_col_total(&Col::A), 7.0);
    assert_eq!(d.weighted_row_total(&Row::Y), 5.0);

    d.clear_row_weightings();
    d.clear_column_weightings();
    assert_eq!(d.weighted_row_total(&Row::X), 10.0);
}

#[test]
fn test_weighted_averages_normalise_by_weighting_mass() {
    let mut d = filled();

    // no weightings on either axis: falls back to the plain averages
    assert_eq!(d.weighted_row_average(&Row::X), d.row_average(&Row::X));
    assert_eq!(d.weighted_col_average(&Col::A), d.col_average(&Col::A));

    let mut col_weights = DoubleMap::new(four_cols());
    col_weights.put(&Col::A, 2.0);
    d.set_column_weightings(col_weights).unwrap();

    // weighted row total 2, column-weighting mass 2
    assert_eq!(d.weighted_row_average(&Row::X), 1.0);
    // no row weighting attached: the column average is the plain one
    assert_eq!(d.weighted_col_average(&Col::A), d.col_average(&Col::A));

    let mut row_weights = DoubleMap::new(rows());
    row_weights.put(&Row::X, 1.0);
    row_weights.put(&Row::Y, 0.5);
    d.set_row_weightings(row_weights).unwrap();

    // col A contributions: 1*1*2 + 5*0.5*2 + 9*0*2 = 7, row mass 1.5
    assert!((d.weighted_col_average(&Col::A) - 7.0 / 1.5).abs() < 1e-9);
}

#[test]
fn test_weighted_total_snapshots() {
    let mut d = filled();

    let mut col_weights = DoubleMap::new(four_cols());
    col_weights.put(&Col::A, 2.0);
    d.set_column_weightings(col_weights).unwrap();

    let by_col = d.weighted_col_totals();
    assert_eq!(by_col.get(&Col::A), 30.0);
    assert_eq!(by_col.get(&Col::B), 0.0);
    assert_eq!(by_col.total(), 30.0);

    let by_row = d.weighted_row_totals();
    assert_eq!(by_row.get(&Row::X), 2.0);
    assert_eq!(by_row.get(&Row::Y), 10.0);
    assert_eq!(by_row.get(&Row::Z), 18.0);

    // snapshots: mutating the extracted totals leaves the matrix alone
    let mut by_col = by_col;
    by_col.put(&Col::A, 0.0);
    assert_eq!(d.weighted_col_total(&Col::A), 30.0);
}

#[test]
fn test_extraction_is_a_snapshot() {
    let d = filled();

    let row_y = d.get_row(&Row::Y);
    assert_eq!(row_y.get(&Col::A), 5.0);
    assert_eq!(row_y.get(&Col::B), 6.0);
    assert_eq!(row_y.get(&Col::C), 7.0);

    let col_b = d.get_column(&Col::B);
    assert_eq!(col_b.get(&Row::X), 2.0);
    assert_eq!(col_b.get(&Row::Y), 6.0);
    assert_eq!(col_b.get(&Row::Z), 10.0);

    // mutating the extracted container leaves the matrix untouched
    let mut row_y = row_y;
    row_y.put(&Col::A, 99.0);
    assert_eq!(d.get(&Col::A, &Row::Y), 5.0);
}

#[test]
fn test_extrema_locations() {
    let mut d = filled();
    assert_eq!(d.max_value(), 12.0);
    assert_eq!(d.min_value(), 1.0);
    assert_eq!(d.max_col(), Some(&Col::D));
    assert_eq!(d.max_row(), Some(&Row::Z));
    assert_eq!(d.min_col(), Some(&Col::A));
    assert_eq!(d.min_row(), Some(&Row::X));

    d.put(&Col::B, &Row::Y, -3.0);
    assert_eq!(d.min_value(), -3.0);
    assert_eq!(d.min_col(), Some(&Col::B));
    assert_eq!(d.min_row(), Some(&Row::Y));
}

#[test]
fn test_clear_and_initial() {
    let mut d = DenseMatrix::with_initial(four_cols(), rows(), 1.0);
    assert_eq!(d.total(), 12.0);
    d.put(&Col::A, &Row::X, 5.0);
    assert_eq!(d.total(), 16.0);
    d.clear();
    assert_eq!(d.get(&Col::A, &Row::X), 1.0);
    assert_eq!(d.total(), 12.0);
}

#[test]
fn test_shape_checks() {
    let d = filled();
    let mut narrow = DenseMatrix::new(cols(), rows());
    assert!(matches!(
        d.copy_into(&mut narrow),
        Err(ShapeError::UniverseMismatch { .. })
    ));

    let mut m = DenseMatrix::new(four_cols(), rows());
    assert_eq!(
        m.put_row_major(&[1.0; 11]),
        Err(ShapeError::LengthMismatch {
            expected: 12,
            got: 11
        })
    );

    let bad_weights = DoubleMap::new(cols());
    let mut m2 = filled();
    assert!(m2.set_column_weightings(bad_weights).is_err());
}

#[test]
fn test_copy_and_duplicate() {
    let d = filled();
    let mut copy = d.duplicate();
    assert_eq!(copy.total(), 0.0);
    d.copy_into(&mut copy).unwrap();
    assert_eq!(copy.total(), 78.0);
    assert_eq!(copy.get(&Col::C, &Row::Z), 11.0);
}

#[test]
fn test_positional_access() {
    let mut d = filled();
    assert_eq!(d.get_at(1, 2), 10.0);
    d.put_at(1, 2, 20.0);
    assert_eq!(d.get(&Col::B, &Row::Z), 20.0);
    assert_eq!(d.col_key(3), Some(&Col::D));
    assert_eq!(d.row_key(0), Some(&Row::X));
    assert_eq!(d.num_cols(), 4);
    assert_eq!(d.num_rows(), 3);
    assert_eq!(d.size(), 12);
}
