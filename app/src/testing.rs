use std::{cell::RefCell, rc::Rc};

use market_feed::{candle::Candle, candles::Candles};

use crate::{
    surface::{CandlePoint, ChartSurface, SeriesLayout, SurfaceFactory, VolumePoint},
    viewport::Size,
};

pub fn candle(time: u64, close: f64) -> Candle {
    Candle {
        time,
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        volume: close / 10.0,
    }
}

pub fn candles(points: &[(u64, f64)]) -> Candles {
    points
        .iter()
        .map(|&(time, close)| candle(time, close))
        .collect::<Vec<_>>()
        .into()
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub created: usize,
    pub destroyed: usize,
    pub created_with: Vec<Size>,
    pub candle_writes: usize,
    pub candles: Vec<CandlePoint>,
    pub volumes: Vec<VolumePoint>,
    pub resized_to: Vec<Size>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    pub log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingFactory {
    pub fn live(&self) -> usize {
        let log = self.log.borrow();
        log.created - log.destroyed
    }
}

pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
    destroyed: bool,
}

impl ChartSurface for RecordingSurface {
    fn set_candle_series(&mut self, data: Vec<CandlePoint>) {
        assert!(!self.destroyed, "write to a destroyed surface");
        let mut log = self.log.borrow_mut();
        log.candle_writes += 1;
        log.candles = data;
    }

    fn set_volume_series(&mut self, data: Vec<VolumePoint>) {
        assert!(!self.destroyed, "write to a destroyed surface");
        self.log.borrow_mut().volumes = data;
    }

    fn resize(&mut self, size: Size) {
        assert!(!self.destroyed, "resize of a destroyed surface");
        self.log.borrow_mut().resized_to.push(size);
    }

    fn destroy(&mut self) {
        assert!(!self.destroyed, "surface destroyed twice");
        self.destroyed = true;
        self.log.borrow_mut().destroyed += 1;
    }
}

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingSurface;

    fn create(&mut self, size: Size, _layout: &SeriesLayout) -> RecordingSurface {
        let mut log = self.log.borrow_mut();
        log.created += 1;
        log.created_with.push(size);
        RecordingSurface {
            log: self.log.clone(),
            destroyed: false,
        }
    }
}
