use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn canvas() -> Rectangle {
    Rectangle::new(0.0, 0.0, 100.0, 100.0)
}

fn no_jitter() -> ScatterOpts {
    ScatterOpts {
        angle_jitter_std_dev: 0.0,
        ..ScatterOpts::default()
    }
}

#[test]
fn rng_is_deterministic_per_seed() {
    let mut a = LayoutRng::from_seed(42);
    let mut b = LayoutRng::from_seed(42);
    for _ in 0..100 {
        assert_eq!(a.gaussian(1.0), b.gaussian(1.0));
        assert_eq!(a.uniform(), b.uniform());
    }
}

#[test]
fn rng_zero_std_dev_and_uniform_range() {
    let mut rng = LayoutRng::from_seed(7);
    for _ in 0..100 {
        assert_eq!(rng.gaussian(0.0), 0.0);
        let u = rng.uniform();
        assert!((0.0..1.0).contains(&u));
    }
}

#[test]
fn empty_background_is_a_no_op() {
    let mut bg: Vec<Rectangle> = Vec::new();
    let mut rng = LayoutRng::from_seed(1);
    scatter_background(&mut bg, &[], &canvas(), &mut rng).unwrap();
}

#[test]
fn background_requires_foreground_reference() {
    let mut bg = vec![Rectangle::new(0.0, 0.0, 10.0, 10.0)];
    let mut rng = LayoutRng::from_seed(1);
    assert!(matches!(
        scatter_background(&mut bg, &[], &canvas(), &mut rng),
        Err(PhotostoryError::EmptyInput(_))
    ));
}

#[test]
fn degenerate_background_is_rejected_before_mutation() {
    let fg = [Rectangle::new(40.0, 40.0, 20.0, 20.0)];
    let mut bg = vec![
        Rectangle::new(0.0, 0.0, 10.0, 10.0),
        Rectangle::new(0.0, 0.0, 10.0, 0.0),
    ];
    let before = bg.clone();
    let mut rng = LayoutRng::from_seed(1);
    assert!(matches!(
        scatter_background(&mut bg, &fg, &canvas(), &mut rng),
        Err(PhotostoryError::Validation(_))
    ));
    assert_eq!(bg, before);
}

#[test]
fn invalid_canvas_is_rejected() {
    let fg = [Rectangle::new(40.0, 40.0, 20.0, 20.0)];
    let mut bg = vec![Rectangle::new(0.0, 0.0, 10.0, 10.0)];
    let mut rng = LayoutRng::from_seed(1);
    assert!(matches!(
        scatter_background(&mut bg, &fg, &Rectangle::new(0.0, 0.0, 0.0, 50.0), &mut rng),
        Err(PhotostoryError::InvalidCanvas(_))
    ));
}

#[test]
fn first_rectangle_sits_below_foreground_without_jitter() {
    let fg = [Rectangle::new(40.0, 40.0, 20.0, 20.0)];
    let mut bg = vec![Rectangle::new(0.0, 0.0, 10.0, 10.0)];
    let mut rng = LayoutRng::from_seed(1);
    scatter_background_with(&mut bg, &fg, &canvas(), &no_jitter(), &mut rng).unwrap();

    let r = bg[0];
    assert!(close(r.width, 24.0));
    assert!(close(r.height, 24.0));
    assert!(close(r.center().x, 50.0));
    assert!(close(r.center().y, 80.0));
}

#[test]
fn second_rectangle_is_opposite_without_jitter() {
    let fg = [Rectangle::new(40.0, 40.0, 20.0, 20.0)];
    let mut bg = vec![
        Rectangle::new(0.0, 0.0, 10.0, 10.0),
        Rectangle::new(0.0, 0.0, 20.0, 5.0),
    ];
    let mut rng = LayoutRng::from_seed(1);
    scatter_background_with(&mut bg, &fg, &canvas(), &no_jitter(), &mut rng).unwrap();

    let r = bg[1];
    assert!(close(r.center().x, 50.0));
    assert!(close(r.center().y, 20.0));
    assert!(close(r.area(), 1.44 * 400.0));
    assert!(close(r.aspect(), 4.0));
}

#[test]
fn missing_foreground_hit_falls_back_to_center() {
    let fg = [Rectangle::new(0.0, 0.0, 10.0, 10.0)];
    let mut bg = vec![Rectangle::new(0.0, 0.0, 10.0, 10.0)];
    let mut rng = LayoutRng::from_seed(1);
    scatter_background_with(&mut bg, &fg, &canvas(), &no_jitter(), &mut rng).unwrap();
    assert!(close(bg[0].center().x, 50.0));
    assert!(close(bg[0].center().y, 75.0));
}

#[test]
fn same_seed_same_scatter() {
    let fg = [Rectangle::new(30.0, 35.0, 40.0, 30.0)];
    let input = vec![Rectangle::new(0.0, 0.0, 10.0, 8.0); 5];

    let mut a = input.clone();
    let mut b = input.clone();
    scatter_background(&mut a, &fg, &canvas(), &mut LayoutRng::from_seed(9)).unwrap();
    scatter_background(&mut b, &fg, &canvas(), &mut LayoutRng::from_seed(9)).unwrap();
    assert_eq!(a, b);

    let mut c = input;
    scatter_background(&mut c, &fg, &canvas(), &mut LayoutRng::from_seed(10)).unwrap();
    assert_ne!(a, c);
}

#[test]
fn scattered_center_stays_outside_foreground_and_inside_canvas() {
    let canvas = Rectangle::new(0.0, 0.0, 160.0, 90.0);
    let fg = [Rectangle::new(50.0, 25.0, 60.0, 40.0)];
    let trials = 200u64;
    let mut good = 0u64;
    for seed in 0..trials {
        let mut bg = vec![Rectangle::new(0.0, 0.0, 30.0, 20.0)];
        scatter_background(&mut bg, &fg, &canvas, &mut LayoutRng::from_seed(seed)).unwrap();
        let c = bg[0].center();
        let outside_fg = c.x < fg[0].left()
            || c.x > fg[0].right()
            || c.y < fg[0].top()
            || c.y > fg[0].bottom();
        let inside_canvas = c.x >= canvas.left()
            && c.x <= canvas.right()
            && c.y >= canvas.top()
            && c.y <= canvas.bottom();
        if outside_fg && inside_canvas {
            good += 1;
        }
    }
    assert!(good * 100 >= trials * 95, "only {good}/{trials} placements were clear");
}

#[test]
fn entropy_rng_produces_usable_samples() {
    let mut rng = LayoutRng::from_entropy();
    let seed = rng.next_seed();
    let mut a = LayoutRng::from_seed(seed);
    let mut b = LayoutRng::from_seed(seed);
    assert_eq!(a.uniform(), b.uniform());
    for _ in 0..100 {
        assert!((0.0..1.0).contains(&rng.uniform()));
        assert!(rng.gaussian(1.0).is_finite());
    }
}
