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


//! the rover data fetch state machine. Every request gets a new token, and completions are only
//! applied if they carry the latest one

use crate::{cache::CacheKey, errors::DashboardError};

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value (&self)->u64 { self.0 }
}

#[derive(Debug,Clone,PartialEq)]
pub enum FetchState {
    Idle,
    Loading { query: CacheKey, token: RequestToken },
    Ready,
    Error { query: CacheKey, error: DashboardError },
}

impl FetchState {
    pub fn is_loading (&self)->bool { matches!( self, FetchState::Loading{..}) }
    pub fn is_error (&self)->bool { matches!( self, FetchState::Error{..}) }
}

#[derive(Debug)]
pub struct FetchWorkflow {
    state: FetchState,
    last_token: u64,
}

impl Default for FetchWorkflow {
    fn default()->Self { FetchWorkflow { state: FetchState::Idle, last_token: 0 } }
}

impl FetchWorkflow {
    pub fn new ()->Self { Self::default() }

    pub fn state (&self)->&FetchState { &self.state }

    /// enter `Loading` for `query` from any state, superseding whatever request was outstanding
    pub fn begin (&mut self, query: CacheKey)->RequestToken {
        self.last_token += 1;
        let token = RequestToken( self.last_token);
        self.state = FetchState::Loading { query, token };
        token
    }

    /// is this the token of the latest issued request that has not been completed yet
    pub fn is_current (&self, token: RequestToken)->bool {
        matches!( &self.state, FetchState::Loading{ token: t, ..} if *t == token)
    }

    /// returns false (and does not change state) if the token is stale
    pub fn complete_ok (&mut self, token: RequestToken)->bool {
        if self.is_current( token) {
            self.state = FetchState::Ready;
            true
        } else {
            false
        }
    }

    /// returns false (and does not change state) if the token is stale
    pub fn complete_err (&mut self, token: RequestToken, error: DashboardError)->bool {
        match &self.state {
            FetchState::Loading{ query, token: t } if *t == token => {
                self.state = FetchState::Error { query: *query, error };
                true
            }
            _ => false
        }
    }

    /// the query to re-issue if we are in the `Error` state
    pub fn retry_query (&self)->Option<CacheKey> {
        match &self.state {
            FetchState::Error{ query, .. } => Some(*query),
            _ => None
        }
    }

    pub fn error (&self)->Option<&DashboardError> {
        match &self.state {
            FetchState::Error{ error, .. } => Some(error),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_tokens() {
        let mut fw = FetchWorkflow::new();
        assert_eq!( fw.state(), &FetchState::Idle);

        let t1 = fw.begin( CacheKey::Sol(10));
        let t2 = fw.begin( CacheKey::Sol(20));
        assert!( t2 > t1);

        assert!( !fw.complete_ok( t1));
        assert!( fw.state().is_loading());
        assert!( fw.complete_ok( t2));
        assert_eq!( fw.state(), &FetchState::Ready);
        assert!( !fw.complete_ok( t2)); // only once
    }

    #[test]
    fn test_error_and_retry() {
        let mut fw = FetchWorkflow::new();
        let t = fw.begin( CacheKey::Latest);
        assert!( fw.complete_err( t, DashboardError::NetworkFailure("connection refused".into())));
        assert_eq!( fw.retry_query(), Some(CacheKey::Latest));

        let t = fw.begin( CacheKey::Latest);
        assert!( fw.retry_query().is_none());
        assert!( fw.complete_ok( t));
    }
}
