pub mod triangle_intersection;
