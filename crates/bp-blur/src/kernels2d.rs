use std::f64::consts::PI;

use bp_core::{Error, centered_index};

/// Normalized 2D Gaussian weight table.
///
/// Conventions:
/// - `size` is odd, `radius = size / 2`.
/// - `weights[centered_index(x, y, size)]` holds the weight at offset `(x, y)`.
/// - Densities are `1/(2*pi*theta^2) * exp(-(x^2+y^2)/(2*theta^2))`,
///   evaluated in f64 and divided by their total, so `sum(weights) ~= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel2D {
    pub size: usize,
    pub radius: usize,
    pub theta: f32,
    pub weights: Vec<f32>,
}

impl GaussianKernel2D {
    pub fn new(size: usize, theta: f32) -> Result<Self, Error> {
        validate_kernel_params(size, theta)?;

        let radius = size / 2;
        let half = radius as isize;
        let theta = f64::from(theta);
        let theta2 = theta * theta;
        let scale = 1.0 / (2.0 * PI * theta2);

        let mut dens = vec![0.0f64; size * size];
        let mut sum = 0.0f64;
        for y in -half..=half {
            for x in -half..=half {
                let r2 = (x * x + y * y) as f64;
                let g = scale * (-r2 / (2.0 * theta2)).exp();
                sum += g;
                dens[centered_index(x, y, size)] = g;
            }
        }

        let weights = dens.iter().map(|&g| (g / sum) as f32).collect();

        Ok(Self {
            size,
            radius,
            theta: theta as f32,
            weights,
        })
    }

    #[inline]
    pub fn weight(&self, x: isize, y: isize) -> f32 {
        self.weights[centered_index(x, y, self.size)]
    }

    pub fn matches(&self, size: usize, theta: f32) -> bool {
        self.size == size && self.theta == theta
    }
}

/// Checks `size` is positive and odd and `theta` is positive and finite.
pub fn validate_kernel_params(size: usize, theta: f32) -> Result<(), Error> {
    if size == 0 || size.is_multiple_of(2) {
        return Err(Error::InvalidKernelSize(size));
    }
    if !theta.is_finite() || theta <= 0.0 {
        return Err(Error::InvalidTheta(theta));
    }
    Ok(())
}
