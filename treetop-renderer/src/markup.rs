//! Number and path formatting shared by the SVG writers.

use std::fmt::Write;

use treetop_core::Point;

/// Format a coordinate with at most three decimals, trailing zeros removed.
pub(crate) fn fmt_coord(value: f64) -> String {
    let mut text = format!("{value:.3}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Format a style number with at least one decimal, e.g. `1.0` or `0.5`.
pub(crate) fn fmt_decimal(value: f64) -> String {
    let mut text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').len();
    text.truncate(trimmed);
    if text.ends_with('.') {
        text.push('0');
    }
    text
}

/// `x,y` for one point.
pub(crate) fn fmt_point(point: Point) -> String {
    format!("{},{}", fmt_coord(point.x), fmt_coord(point.y))
}

/// Space-separated `x,y` pairs for a `points` attribute.
pub(crate) fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|&p| fmt_point(p))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `M x,y L x,y ... Z` path data for a closed polygon.
pub(crate) fn closed_path_data(points: &[Point]) -> String {
    let body = points
        .iter()
        .map(|&p| fmt_point(p))
        .collect::<Vec<_>>()
        .join(" L ");
    format!("M {body} Z")
}

/// Path data for a quadratic B-spline guided by `points`.
///
/// The curve starts at the first point, runs straight to the first segment
/// midpoint, bends through each interior point towards the next midpoint and
/// ends with a straight run to the last point.
pub(crate) fn spline_path_data(points: &[Point]) -> String {
    let mut data = String::new();
    match points {
        [] => {}
        [only] => {
            let _ = write!(data, "M {}", fmt_point(*only));
        }
        [first, second] => {
            let _ = write!(data, "M {} L {}", fmt_point(*first), fmt_point(*second));
        }
        [first, second, ..] => {
            let _ = write!(
                data,
                "M {} L {}",
                fmt_point(*first),
                fmt_point(first.midpoint(*second))
            );
            for window in points[1..].windows(2) {
                let (control, next) = (window[0], window[1]);
                let _ = write!(
                    data,
                    " Q {} {}",
                    fmt_point(control),
                    fmt_point(control.midpoint(next))
                );
            }
            if let Some(last) = points.last() {
                let _ = write!(data, " L {}", fmt_point(*last));
            }
        }
    }
    data
}

/// Escape XML special characters.
pub(crate) fn escape_xml(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&apos;"),
            _ => output.push(ch),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_coord() {
        assert_eq!(fmt_coord(100.0), "100");
        assert_eq!(fmt_coord(86.602_540_378), "86.603");
        assert_eq!(fmt_coord(0.5), "0.5");
        assert_eq!(fmt_coord(-0.000_1), "0");
        assert_eq!(fmt_coord(-12.25), "-12.25");
    }

    #[test]
    fn test_fmt_decimal() {
        assert_eq!(fmt_decimal(1.0), "1.0");
        assert_eq!(fmt_decimal(10.0), "10.0");
        assert_eq!(fmt_decimal(0.5), "0.5");
        assert_eq!(fmt_decimal(0.0), "0.0");
    }

    #[test]
    fn test_closed_path_data() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        assert_eq!(closed_path_data(&points), "M 0,0 L 10,0 L 0,0 Z");
        assert_eq!(points_attr(&points), "0,0 10,0 0,0");
    }

    #[test]
    fn test_spline_path_data() {
        assert_eq!(spline_path_data(&[]), "");
        assert_eq!(
            spline_path_data(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0)]),
            "M 0,0 L 4,0"
        );
        assert_eq!(
            spline_path_data(&[
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
            ]),
            "M 0,0 L 2,0 Q 4,0 4,2 L 4,4"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("Trees & <shrubs> \"A\" 'B'"),
            "Trees &amp; &lt;shrubs&gt; &quot;A&quot; &apos;B&apos;"
        );
    }
}
