use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn ray_point_at_parameter() {
    let ray = Ray::new(Point::new(1.0, 2.0), Vec2::new(2.0, -1.0));
    assert_eq!(ray.at(0.0), Point::new(1.0, 2.0));
    assert_eq!(ray.at(1.5), Point::new(4.0, 0.5));
    let back = ray.reversed_from(Point::new(4.0, 0.5));
    assert_eq!(back.direction, Vec2::new(-2.0, 1.0));
    assert_eq!(back.at(1.5), Point::new(1.0, 2.0));
}

#[test]
fn segment_hit_in_front() {
    let ray = Ray::new(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    let t = intersect_ray_segment(&ray, Point::new(3.0, -1.0), Point::new(3.0, 1.0)).unwrap();
    assert!(close(t, 3.0));
}

#[test]
fn segment_endpoint_order_does_not_change_hit() {
    let ray = Ray::new(Point::new(0.0, 0.0), Vec2::new(1.0, 1.0));
    let a = intersect_ray_segment(&ray, Point::new(4.0, 0.0), Point::new(0.0, 4.0)).unwrap();
    let b = intersect_ray_segment(&ray, Point::new(0.0, 4.0), Point::new(4.0, 0.0)).unwrap();
    assert!(close(a, 2.0));
    assert!(close(b, 2.0));
}

#[test]
fn segment_endpoints_are_inclusive() {
    let ray = Ray::new(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    assert!(intersect_ray_segment(&ray, Point::new(5.0, 0.0), Point::new(5.0, 3.0)).is_some());
    assert!(intersect_ray_segment(&ray, Point::new(5.0, -3.0), Point::new(5.0, 0.0)).is_some());
    assert!(intersect_ray_segment(&ray, Point::new(5.0, 0.5), Point::new(5.0, 3.0)).is_none());
}

#[test]
fn segment_behind_ray_misses() {
    let ray = Ray::new(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    assert!(intersect_ray_segment(&ray, Point::new(-3.0, -1.0), Point::new(-3.0, 1.0)).is_none());
}

#[test]
fn parallel_segment_misses() {
    let ray = Ray::new(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    assert!(intersect_ray_segment(&ray, Point::new(1.0, 0.0), Point::new(5.0, 0.0)).is_none());
    assert!(intersect_ray_segment(&ray, Point::new(1.0, 2.0), Point::new(5.0, 2.0)).is_none());
}

#[test]
fn degenerate_segment_or_direction_misses() {
    let ray = Ray::new(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    assert!(intersect_ray_segment(&ray, Point::new(2.0, 0.0), Point::new(2.0, 0.0)).is_none());
    let still = Ray::new(Point::new(0.0, 0.0), Vec2::ZERO);
    assert!(intersect_ray_segment(&still, Point::new(2.0, -1.0), Point::new(2.0, 1.0)).is_none());
}

#[test]
fn ray_from_inside_rectangle_hits_forward_edge() {
    let ray = Ray::new(Point::new(5.0, 5.0), Vec2::new(1.0, 0.0));
    let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    let t = intersect_ray_rectangle(&ray, &rect).unwrap();
    assert!(close(t, 5.0));
    assert_eq!(ray.at(t), Point::new(10.0, 5.0));
}

#[test]
fn ray_from_outside_rectangle_hits_near_edge() {
    let ray = Ray::new(Point::new(-10.0, 5.0), Vec2::new(2.0, 0.0));
    let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    let t = intersect_ray_rectangle(&ray, &rect).unwrap();
    assert!(close(t, 5.0));
}

#[test]
fn ray_missing_rectangle() {
    let ray = Ray::new(Point::new(-10.0, 50.0), Vec2::new(1.0, 0.0));
    let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    assert!(intersect_ray_rectangle(&ray, &rect).is_none());
}

#[test]
fn diagonal_ray_through_corner() {
    let ray = Ray::new(Point::new(5.0, 5.0), Vec2::new(1.0, 1.0));
    let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    let t = intersect_ray_rectangle(&ray, &rect).unwrap();
    assert!(close(t, 5.0));
}

#[test]
fn nearest_rectangle_wins() {
    let ray = Ray::new(Point::new(0.0, 5.0), Vec2::new(1.0, 0.0));
    let rects = [
        Rectangle::new(30.0, 0.0, 10.0, 10.0),
        Rectangle::new(10.0, 0.0, 10.0, 10.0),
        Rectangle::new(50.0, 20.0, 10.0, 10.0),
    ];
    let t = intersect_ray_rectangles(&ray, &rects).unwrap();
    assert!(close(t, 10.0));
    assert!(intersect_ray_rectangles(&ray, &rects[2..]).is_none());
    assert!(intersect_ray_rectangles(&ray, &[] as &[Rectangle]).is_none());
}
