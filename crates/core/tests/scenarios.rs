use quickcheck_macros::quickcheck;
use sigtheory_core::prelude::*;

#[test]
fn decimate_by_half_rate() {
    let signal = Signal::new((0..8).map(f64::from).collect(), 44100.0).unwrap();
    let decimated = decimate(&signal, signal.sample_rate() / 2.0).unwrap();
    assert_eq!(decimated.samples(), &[0.0, 2.0, 4.0, 6.0]);
}

#[test]
fn reconstruct_between_two_points() {
    let rebuilt = reconstruct(&[0.0, 4.0], 5).unwrap();
    for (value, expected) in rebuilt.iter().zip([0.0, 1.0, 2.0, 3.0, 4.0]) {
        assert!((value - expected).abs() < 1e-12);
    }
}

#[test]
fn autocorrelation_of_short_ramp() {
    let result = autocorrelate(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(result.values(), &[3.0, 8.0, 14.0, 8.0, 3.0]);
    assert_eq!(result.lags(), vec![-2, -1, 0, 1, 2]);
}

#[test]
fn constant_signal_spectrum() {
    let (spectrum, report) = analyze(&[5.0, 5.0, 5.0, 5.0]).unwrap();
    let magnitude = spectrum.magnitude();
    assert!((magnitude[0] - 20.0).abs() < 1e-10);
    assert!(magnitude[1..].iter().all(|m| m.abs() < 1e-10));
    assert!(report.all_symmetric());
}

#[test]
fn empty_inputs_fail_with_their_error_kind() {
    let empty = Signal::new(Vec::new(), 8000.0).unwrap();

    assert_eq!(decimate(&empty, 4000.0), Err(CoreError::EmptySignal));
    assert!(matches!(
        reconstruct(&[], 10),
        Err(CoreError::InvalidLength { .. })
    ));
    assert!(matches!(
        reconstruct(&[1.0], 10),
        Err(CoreError::InvalidLength { .. })
    ));
    assert_eq!(analyze(&[]), Err(CoreError::EmptySignal));
    assert!(matches!(
        correlate(&[], &[1.0]),
        Err(CoreError::EmptyInput { .. })
    ));
    assert_eq!(
        deconvolve(&[], &Kernel::impulse(), DEFAULT_REGULARIZATION),
        Err(CoreError::EmptySignal)
    );
}

#[test]
fn delayed_copy_is_found_by_cross_correlation() {
    let sample_rate = 1000.0;
    let reference = tones(500, &[Tone::sine(1.0, 7.0), Tone::cosine(0.3, 41.0)]);
    let windowed: Vec<f64> = reference
        .iter()
        .enumerate()
        .map(|(i, s)| if (100..200).contains(&i) { *s } else { 0.0 })
        .collect();
    let delay_samples = (0.05 * sample_rate) as isize;
    let delayed = roll(&windowed, delay_samples);

    assert_eq!(estimate_delay(&windowed, &delayed).unwrap(), delay_samples);
}

#[test]
fn deconvolution_recovers_full_convolution() {
    let x = tones(200, &[Tone::sine(1.0, 5.0), Tone::sine(0.5, 10.0)]);
    let kernel = Kernel::new(vec![0.8, 0.3, -0.1]).unwrap();
    let observed = convolve(&x, kernel.taps(), ConvolveMode::Full).unwrap();

    let estimate = deconvolve(&observed, &kernel, 1e-9).unwrap();
    assert!(rms_error(&estimate[..x.len()], &x).unwrap() < 1e-6);
}

#[quickcheck]
fn decimate_then_reconstruct_keeps_length(len: u16, fraction: u32) -> bool {
    let len = (len as usize % 2000) + 2;
    let rate = 44100.0;
    // Arbitrary rate in (0, rate], usually a non-integral ratio
    let target_rate = rate * (fraction as f64 + 1.0) / (u32::MAX as f64 + 1.0);
    let stride = (rate / target_rate) as usize;
    // Keep at least two control points
    if stride > len - 1 {
        return true;
    }

    let samples: Vec<f64> = (0..len).map(|i| (i as f64 * 0.1).sin()).collect();
    let signal = Signal::new(samples, rate).unwrap();
    let sampled = decimate(&signal, target_rate).unwrap();
    let rebuilt = reconstruct(sampled.samples(), signal.len()).unwrap();

    sampled.len() == len.div_ceil(stride) && rebuilt.len() == signal.len()
}

#[test]
fn non_integral_ratio_truncates_stride() {
    // 44100 / 8000 = 5.5125
    let signal = Signal::new(vec![0.0; 1000], 44100.0).unwrap();
    let sampled = decimate(&signal, 8000.0).unwrap();

    assert_eq!(sampled.len(), 1000usize.div_ceil(5));
    assert!((sampled.sample_rate() - 8820.0).abs() < 1e-9);
    assert_eq!(reconstruct(sampled.samples(), 1000).unwrap().len(), 1000);
}
