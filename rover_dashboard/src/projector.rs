/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */


use rover_common::{BoundingBox, clamp_f64};
use rover_data::{Location, RoutePoint, Sol};

/// default bounds padding in degrees
pub const DEFAULT_PADDING: f64 = 0.003;

/// a position in map overlay space, both coordinates in percent [0..100]. `y` grows southwards
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

/// where everything goes if we can't compute a meaningful projection
pub const MAP_CENTER: MapPoint = MapPoint { x: 50.0, y: 50.0 };

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ProjectedPoint {
    pub sol: Sol,
    pub pos: MapPoint,
}

/// the part of a route that has been traveled up to the selected sol, in overlay coordinates
#[derive(Debug,Clone,PartialEq)]
pub struct ProjectedRoute {
    pub bounds: Option<BoundingBox>,
    pub points: Vec<ProjectedPoint>,
    pub current: MapPoint,
}

/// linear lat/lon to percent mapping over the (padded) bounds of a route
#[derive(Debug,Clone,Copy)]
pub struct MapProjector {
    padding: f64,
}

impl Default for MapProjector {
    fn default()->Self { MapProjector { padding: DEFAULT_PADDING } }
}

impl MapProjector {
    pub fn new (padding: f64)->Self {
        MapProjector { padding: padding.abs() }
    }

    /// padded bounds of the given route points. `None` if there are no points or the points themselves
    /// have no extent in either direction. Padding never turns a line into an area
    pub fn bounds<'a,I> (&self, points: I)->Option<BoundingBox> where I: IntoIterator<Item=&'a RoutePoint> {
        BoundingBox::from_lon_lats( points.into_iter().map( |p| (p.lon, p.lat)))
            .filter( |b| !b.is_degenerate())
            .map( |b| b.padded( self.padding))
    }

    pub fn project (&self, bounds: Option<&BoundingBox>, lat: f64, lon: f64)->MapPoint {
        match bounds {
            Some(b) if !b.is_degenerate() => {
                let x = (lon - b.west) / b.width() * 100.0;
                let y = (b.north - lat) / b.height() * 100.0;
                MapPoint { x: clamp_f64( x, 0.0, 100.0), y: clamp_f64( y, 0.0, 100.0) }
            }
            _ => MAP_CENTER
        }
    }

    /// project all route points with `sol <= selected_sol`, using the bounds of those points
    pub fn project_route (&self, route: &[RoutePoint], current: &Location, selected_sol: Sol)->ProjectedRoute {
        let traveled: Vec<&RoutePoint> = route.iter().filter( |p| p.sol <= selected_sol).collect();
        let bounds = self.bounds( traveled.iter().copied());

        let points = traveled.iter()
            .map( |p| ProjectedPoint { sol: p.sol, pos: self.project( bounds.as_ref(), p.lat, p.lon) })
            .collect();
        let current = self.project( bounds.as_ref(), current.lat, current.lon);

        ProjectedRoute { bounds, points, current }
    }
}
