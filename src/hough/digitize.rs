/// Returns `n` evenly spaced values spanning `[min, max]`, both ends included.
///
/// `n == 1` yields `[min]`; `n == 0` yields an empty vector.
pub fn linspace(n: usize, min: f64, max: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| min + step * i as f64).collect();
            // pin the last boundary so accumulated rounding never moves `max`
            out[n - 1] = max;
            out
        }
    }
}

/// Leftmost insertion index of `value` in the ascending `bins`.
///
/// Values below `bins[0]` map to 0, values above the last boundary map to
/// `bins.len()`, and a value equal to a boundary maps to that boundary's index.
#[inline]
pub fn bin_index(bins: &[f64], value: f64) -> usize {
    bins.partition_point(|&b| b < value)
}

/// Digitizes `values` against the boundary sequence `bins` into `dst`.
pub fn digitize_into(dst: &mut [usize], values: &[f64], bins: &[f64]) {
    assert_eq!(
        dst.len(),
        values.len(),
        "hough: length mismatch between digitized and raw columns"
    );
    for (d, &v) in dst.iter_mut().zip(values) {
        *d = bin_index(bins, v);
    }
}

/// Digitizes `values` into `nbins` boundaries spanning `[min, max]`.
pub fn digitize_range(dst: &mut [usize], values: &[f64], nbins: usize, min: f64, max: f64) {
    let bins = linspace(nbins, min, max);
    digitize_into(dst, values, &bins);
}
