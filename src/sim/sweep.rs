//! Partitioning a beam into sub-beams by nearest struck edge
//!
//! Every edge that survives [`clip_edge`] becomes a depth function over the
//! beam's lateral coordinate. Sweeping right to left over the edges' end
//! points (and the crossings between active edges) yields the lower envelope
//! of those functions; each envelope segment is one sub-beam.

use std::collections::HashMap;

use glam::DVec2;

use super::clip::{BeamFrame, ClippedEdge, clip_edge};
use crate::consts::EPSILON;
use crate::error::{LightError, LightResult};
use crate::interactor::{RayInteractorEdge, Strike};
use crate::light::{BeamLightRay, Ray};
use crate::scene::{InteractorId, Scene};

/// Clipped edge to owning interactor; the back edge maps to `None`
#[derive(Debug, Clone, Default)]
pub struct EdgeMap {
    owners: HashMap<RayInteractorEdge, Option<InteractorId>>,
}

impl EdgeMap {
    /// Keeps the first owner if two interactors produce the same edge
    fn insert(&mut self, edge: RayInteractorEdge, owner: Option<InteractorId>) {
        self.owners.entry(edge).or_insert(owner);
    }

    /// Interactor owning `edge`, `None` for the back edge or unknown edges
    pub fn owner(&self, edge: &RayInteractorEdge) -> Option<InteractorId> {
        self.owners.get(edge).copied().flatten()
    }

    pub fn contains(&self, edge: &RayInteractorEdge) -> bool {
        self.owners.contains_key(edge)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// One sub-beam and the edge it ends on
#[derive(Debug, Clone)]
pub struct SweepHit {
    pub beam: BeamLightRay,
    pub edge: RayInteractorEdge,
    pub left_point: DVec2,
    pub right_point: DVec2,
    /// Lateral extent as fractions of the parent beam's width, right to left
    pub span: (f64, f64),
}

impl SweepHit {
    pub fn strike(&self) -> Strike<'_> {
        Strike {
            beam: &self.beam,
            edge: &self.edge,
            left_point: self.left_point,
            right_point: self.right_point,
        }
    }

    pub fn fraction(&self) -> f64 {
        self.span.1 - self.span.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sweep {
    /// Sub-beams ordered right to left; their spans tile `[0, 1]`
    pub hits: Vec<SweepHit>,
    pub edges: EdgeMap,
}

/// End point of a clipped edge in `(u, depth)`
#[derive(Debug, Clone, Copy)]
struct Boundary {
    u: f64,
    depth: f64,
    edge: usize,
}

/// Split `beam` against every interactor edge in `scene`
///
/// A beam with no positive width produces no hits.
pub fn sweep(scene: &Scene, beam: &BeamLightRay) -> LightResult<Sweep> {
    let frame = BeamFrame::new(beam);
    if frame.width < EPSILON {
        log::debug!("Skipping degenerate beam {beam} (width {:.3e})", frame.width);
        return Ok(Sweep::default());
    }

    let mut edges = EdgeMap::default();
    let mut clipped = Vec::new();
    for (id, interactor) in scene.iter() {
        for world in interactor.world_bounds() {
            if let Some(edge) = clip_edge(&frame, &world) {
                edges.insert(edge.edge, Some(id));
                clipped.push(edge);
            }
        }
    }
    let back = frame.back_edge();
    edges.insert(back.edge, None);
    clipped.push(back);

    let mut points: Vec<Boundary> = clipped
        .iter()
        .enumerate()
        .flat_map(|(edge, c)| {
            [
                Boundary { u: c.lo.x, depth: c.lo.y, edge },
                Boundary { u: c.hi.x, depth: c.hi.y, edge },
            ]
        })
        .collect();
    points.sort_by(|a, b| a.u.total_cmp(&b.u).then(a.depth.total_cmp(&b.depth)));

    let mut envelope = Envelope {
        frame: &frame,
        source: beam,
        edges: &clipped,
        active: Vec::new(),
        current: None,
        span_start: 0.0,
        cursor: 0.0,
        hits: Vec::new(),
    };

    let mut i = 0;
    while i < points.len() {
        let u = points[i].u;
        envelope.advance_to(u)?;

        while i < points.len() && points[i].u - u <= EPSILON {
            envelope.toggle(points[i].edge);
            i += 1;
        }
        if u >= frame.width - EPSILON {
            break;
        }

        let nearest = envelope.nearest_at(u).ok_or(LightError::NoActiveEdge { position: u })?;
        envelope.switch_to(nearest, u)?;
    }
    let hits = envelope.finish()?;

    log::debug!(
        "Swept {beam}: {} edges in range, {} sub-beams",
        clipped.len(),
        hits.len()
    );
    Ok(Sweep { hits, edges })
}

/// Sweep state: which edges are active and which one is nearest
struct Envelope<'a> {
    frame: &'a BeamFrame,
    source: &'a BeamLightRay,
    edges: &'a [ClippedEdge],
    active: Vec<usize>,
    current: Option<usize>,
    span_start: f64,
    /// Position up to which the envelope is resolved
    cursor: f64,
    hits: Vec<SweepHit>,
}

impl Envelope<'_> {
    fn toggle(&mut self, edge: usize) {
        if let Some(pos) = self.active.iter().position(|&a| a == edge) {
            self.active.swap_remove(pos);
        } else {
            self.active.push(edge);
        }
    }

    /// Nearest active edge at `u`; ties go to the one heading closer
    fn nearest_at(&self, u: f64) -> Option<usize> {
        self.active.iter().copied().min_by(|&a, &b| {
            let (ea, eb) = (&self.edges[a], &self.edges[b]);
            let (da, db) = (ea.depth_at(u), eb.depth_at(u));
            if (da - db).abs() <= EPSILON {
                ea.slope().total_cmp(&eb.slope())
            } else {
                da.total_cmp(&db)
            }
        })
    }

    /// Follow crossings of the current edge by other active edges up to `u`
    fn advance_to(&mut self, u: f64) -> LightResult<()> {
        while let Some(current) = self.current {
            let edge = &self.edges[current];
            let (depth, slope) = (edge.depth_at(self.cursor), edge.slope());

            let mut crossing: Option<(f64, usize)> = None;
            for &other in &self.active {
                if other == current {
                    continue;
                }
                let o = &self.edges[other];
                let o_slope = o.slope();
                if o_slope >= slope {
                    continue;
                }
                let x = self.cursor + (o.depth_at(self.cursor) - depth) / (slope - o_slope);
                if x > self.cursor + EPSILON && x < u - EPSILON && crossing.is_none_or(|(best, _)| x < best) {
                    crossing = Some((x, other));
                }
            }

            let Some((x, other)) = crossing else { break };
            self.switch_to(other, x)?;
        }
        self.cursor = u;
        Ok(())
    }

    /// Close the running span at `u` if `next` takes over there
    fn switch_to(&mut self, next: usize, u: f64) -> LightResult<()> {
        match self.current {
            Some(current) if current == next => {}
            Some(current) => {
                // Spans too narrow to carry a beam merge into the next one
                if u - self.span_start >= EPSILON {
                    self.emit(current, self.span_start, u)?;
                    self.span_start = u;
                }
                self.current = Some(next);
            }
            None => {
                self.current = Some(next);
                self.span_start = u;
            }
        }
        self.cursor = u;
        Ok(())
    }

    fn finish(mut self) -> LightResult<Vec<SweepHit>> {
        if let Some(current) = self.current {
            self.emit(current, self.span_start, self.frame.width)?;
        }
        Ok(self.hits)
    }

    fn emit(&mut self, edge: usize, right_u: f64, left_u: f64) -> LightResult<()> {
        let frame = self.frame;
        let clipped = &self.edges[edge];
        let right = Ray::new(
            frame.base_at(right_u),
            frame.direction,
            clipped.depth_at(right_u).max(0.0),
            frame.strength_at(right_u),
        );
        let left = Ray::new(
            frame.base_at(left_u),
            frame.direction,
            clipped.depth_at(left_u).max(0.0),
            frame.strength_at(left_u),
        );
        let beam = BeamLightRay::new(self.source.colour(), left, right)?;
        self.hits.push(SweepHit {
            beam,
            edge: clipped.edge,
            left_point: left.end(),
            right_point: right.end(),
            span: (right_u / frame.width, left_u / frame.width),
        });
        Ok(())
    }
}
