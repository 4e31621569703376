pub mod roadmap;

pub use roadmap::RoadmapView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
