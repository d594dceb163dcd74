//! Club occupancy state machine.
//!
//! Applies validated events one at a time against the club state and
//! reports at most one outgoing message per event. Table statistics are
//! accumulated whenever a seated client leaves their table.
//!
//! # Rules Summary
//!
//! 1. Arrivals are admitted only during `[open, close)` and only once.
//! 2. Taking a table requires a known client and a free table; a client who
//!    is already seated moves, paying for the table they leave.
//! 3. Waiting is only accepted when every table is busy; a full waiting list
//!    turns the client away.
//! 4. A seated client leaving frees the table for the head of the waiting list.
//! 5. At closing time everyone still inside leaves, in name order.

use std::collections::{BTreeMap, VecDeque};

use chrono::{NaiveTime, TimeDelta};

use crate::clock::billable_hours;
use crate::config::ClubConfig;
use crate::event::{Event, EventKind};
use crate::message::{ClubError, Outgoing, OutgoingKind};
use crate::types::ClientName;

/// Accumulated usage of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStat {
    /// Total time the table was occupied.
    pub busy: TimeDelta,
    /// Total money earned by the table.
    pub revenue: u64,
}

impl Default for TableStat {
    fn default() -> Self {
        Self {
            busy: TimeDelta::zero(),
            revenue: 0,
        }
    }
}

/// Where and since when a client sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Seat {
    table: usize,
    since: NaiveTime,
}

/// A client currently inside the club.
#[derive(Debug, Clone, Default)]
struct ClientInfo {
    /// `None` while the client stands or waits.
    seat: Option<Seat>,
}

/// Mutable club state driven by incoming events.
#[derive(Debug, Clone)]
pub struct Club {
    config: ClubConfig,
    occupied: usize,
    clients: BTreeMap<ClientName, ClientInfo>,
    waiting: VecDeque<ClientName>,
    stats: Vec<TableStat>,
}

impl Club {
    /// Creates an empty club with zeroed statistics for every table.
    pub fn new(config: ClubConfig) -> Self {
        let stats = vec![TableStat::default(); config.tables];
        Self {
            config,
            occupied: 0,
            clients: BTreeMap::new(),
            waiting: VecDeque::new(),
            stats,
        }
    }

    pub const fn config(&self) -> &ClubConfig {
        &self.config
    }

    /// Applies one event, returning the message it provokes, if any.
    pub fn apply(&mut self, event: &Event) -> Option<Outgoing> {
        match event.kind {
            EventKind::Arrived => self.arrive(event),
            EventKind::TookTable => self.take_table(event),
            EventKind::StartedWaiting => self.start_waiting(event),
            EventKind::Left => self.leave(event),
        }
    }

    /// Sends everyone home at closing time.
    ///
    /// Clients leave in name order; the waiting list is dropped rather than
    /// promoted. Calling this again finds nobody left and returns nothing.
    pub fn close(&mut self) -> Vec<Outgoing> {
        let close = self.config.close;
        self.waiting.clear();

        let clients = std::mem::take(&mut self.clients);
        clients
            .into_iter()
            .map(|(client, info)| {
                if let Some(seat) = info.seat {
                    self.bill(seat, close);
                }
                tracing::debug!(%client, "client sent home at closing");
                Outgoing::new(close, OutgoingKind::ClientLeft(client))
            })
            .collect()
    }

    /// Per-table statistics, index 0 being table 1.
    pub fn table_stats(&self) -> &[TableStat] {
        &self.stats
    }

    /// Number of tables currently occupied.
    pub const fn occupied_tables(&self) -> usize {
        self.occupied
    }

    /// Number of known clients sitting at a table.
    pub fn seated_clients(&self) -> usize {
        self.clients.values().filter(|c| c.seat.is_some()).count()
    }

    /// Whether `client` is currently inside the club.
    pub fn is_present(&self, client: &str) -> bool {
        self.clients.contains_key(client)
    }

    /// The table `client` sits at, if any.
    pub fn table_of(&self, client: &str) -> Option<usize> {
        self.clients.get(client)?.seat.map(|s| s.table)
    }

    /// Clients in the waiting list, head first.
    pub fn waiting(&self) -> impl Iterator<Item = &ClientName> {
        self.waiting.iter()
    }

    fn is_table_busy(&self, table: usize) -> bool {
        self.clients
            .values()
            .any(|c| c.seat.is_some_and(|s| s.table == table))
    }

    fn arrive(&mut self, event: &Event) -> Option<Outgoing> {
        if !self.config.is_open(event.time) {
            return Some(Outgoing::error(event.time, ClubError::NotOpenYet));
        }
        if self.clients.contains_key(&event.client) {
            return Some(Outgoing::error(event.time, ClubError::YouShallNotPass));
        }
        self.clients
            .insert(event.client.clone(), ClientInfo::default());
        None
    }

    fn take_table(&mut self, event: &Event) -> Option<Outgoing> {
        let Some(table) = event
            .table
            .filter(|t| (1..=self.config.tables).contains(t))
        else {
            tracing::warn!(event = %event, "took-table event without a valid table, ignoring");
            return None;
        };

        if self.is_table_busy(table) {
            return Some(Outgoing::error(event.time, ClubError::PlaceIsBusy));
        }
        if !self.clients.contains_key(&event.client) {
            return Some(Outgoing::error(event.time, ClubError::ClientUnknown));
        }

        if let Some(previous) = self.vacate(&event.client, event.time) {
            tracing::debug!(client = %event.client, from = previous, to = table, "client moved");
        }
        self.seat(&event.client, table, event.time);
        self.waiting.retain(|c| c != &event.client);
        None
    }

    fn start_waiting(&mut self, event: &Event) -> Option<Outgoing> {
        match self.clients.get(&event.client) {
            Some(info) if info.seat.is_none() => {}
            _ => return None,
        }
        if self.waiting.contains(&event.client) {
            return None;
        }
        if self.occupied < self.config.tables {
            return Some(Outgoing::error(event.time, ClubError::ICanWaitNoLonger));
        }
        if self.waiting.len() + 1 > self.config.tables {
            self.clients.remove(&event.client);
            tracing::debug!(client = %event.client, "waiting list full, client left");
            return Some(Outgoing::new(
                event.time,
                OutgoingKind::ClientLeft(event.client.clone()),
            ));
        }

        self.waiting.push_back(event.client.clone());
        tracing::debug!(client = %event.client, position = self.waiting.len(), "client waiting");
        None
    }

    fn leave(&mut self, event: &Event) -> Option<Outgoing> {
        if !self.clients.contains_key(&event.client) {
            return Some(Outgoing::error(event.time, ClubError::ClientUnknown));
        }

        let freed = self.vacate(&event.client, event.time);
        self.clients.remove(&event.client);

        let Some(table) = freed else {
            self.waiting.retain(|c| c != &event.client);
            return None;
        };

        let next = self.waiting.pop_front()?;
        self.seat(&next, table, event.time);
        tracing::debug!(client = %next, table, "waiting client seated");
        Some(Outgoing::new(
            event.time,
            OutgoingKind::ClientTookTable(next, table),
        ))
    }

    /// Seats a known client. Unknown clients are ignored.
    fn seat(&mut self, client: &ClientName, table: usize, now: NaiveTime) {
        let Some(info) = self.clients.get_mut(client) else {
            return;
        };
        info.seat = Some(Seat { table, since: now });
        self.occupied += 1;
        tracing::debug!(%client, table, "client seated");
    }

    /// Stands a seated client up and bills their table.
    ///
    /// Returns the table they left, or `None` if they were not seated.
    fn vacate(&mut self, client: &ClientName, now: NaiveTime) -> Option<usize> {
        let seat = self.clients.get_mut(client)?.seat.take()?;
        self.bill(seat, now);
        Some(seat.table)
    }

    fn bill(&mut self, seat: Seat, now: NaiveTime) {
        self.occupied -= 1;

        let elapsed = (now - seat.since).max(TimeDelta::zero());
        let stat = &mut self.stats[seat.table - 1];
        stat.busy += elapsed;
        stat.revenue += billable_hours(elapsed) * u64::from(self.config.tariff);
        tracing::debug!(
            table = seat.table,
            minutes = elapsed.num_minutes(),
            revenue = stat.revenue,
            "table billed"
        );
    }
}
