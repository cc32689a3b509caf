use image::{GrayImage, Luma};

/// Sigma used for a Gaussian kernel of `ksize` taps when none is given:
/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian kernel with `ksize` taps (odd) and the given sigma.
pub fn gaussian_kernel_1d(ksize: usize, sigma: f64) -> Vec<f64> {
    let half = (ksize / 2) as f64;
    let mut kernel: Vec<f64> = (0..ksize)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

// Mirror index without repeating the edge sample: `dcb|abcd|cba`.
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }

    let len = len as isize;
    let period = 2 * (len - 1);
    let i = i.rem_euclid(period);
    (if i >= len { period - i } else { i }) as usize
}

/// Separable Gaussian blur with a square `ksize` x `ksize` kernel.
pub fn gaussian_blur(image: &GrayImage, ksize: usize) -> GrayImage {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if width == 0 || height == 0 {
        return image.clone();
    }

    let kernel = gaussian_kernel_1d(ksize, sigma_for_kernel(ksize));
    let half = (kernel.len() / 2) as isize;
    let src = image.as_raw();

    // Horizontal pass
    let mut temp = vec![0.0f64; width * height];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            temp[y * width + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, kv)| {
                    let sx = reflect_101(x as isize + k as isize - half, width);
                    row[sx] as f64 * kv
                })
                .sum();
        }
    }

    // Vertical pass
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let sum: f64 = kernel
            .iter()
            .enumerate()
            .map(|(k, kv)| {
                let sy = reflect_101(y as isize + k as isize - half, height);
                temp[sy * width + x] * kv
            })
            .sum();

        Luma([sum.round_ties_even().clamp(0.0, 255.0) as u8])
    })
}
