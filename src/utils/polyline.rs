//! Google encoded polyline format (precision 1e5).
//!
//! Each step of a directions leg carries its geometry as an encoded string;
//! the leg's point sequence is the concatenation of the decoded steps.

use crate::domain::model::Coordinate;
use crate::utils::error::{Result, RouteError};

const PRECISION: f64 = 1e5;

pub fn decode(encoded: &str) -> Result<Vec<Coordinate>> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat = lat
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or(RouteError::PolylineError { position: index })?;
        lng = lng
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or(RouteError::PolylineError { position: index })?;
        points.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or(RouteError::PolylineError { position: *index })?;
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(RouteError::PolylineError { position: *index });
        }
        *index += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

pub fn encode(points: &[Coordinate]) -> String {
    let mut output = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lng = (point.longitude * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut output);
        encode_value(lng - prev_lng, &mut output);
        prev_lat = lat;
        prev_lng = lng;
    }

    output
}

fn encode_value(delta: i64, output: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= 0x20 {
        output.push(char::from((0x20 | (value & 0x1f)) as u8 + 63));
        value >>= 5;
    }
    output.push(char::from(value as u8 + 63));
}
