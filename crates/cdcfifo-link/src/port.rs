use cdcfifo_core::{Consumer, DualClockFifo, Producer, ReadOutcome, ReadStatus, WriteOutcome, WriteStatus};
use cdcfifo_dsa::{Geometry, Word};

/// The producer-domain face of a buffer.
pub trait ProducerPort {
    fn write_status(&self) -> WriteStatus;
    fn write_step(&mut self, enable: bool, data: Word) -> WriteOutcome;
    fn geometry(&self) -> &Geometry;
}

/// The consumer-domain face of a buffer.
pub trait ConsumerPort {
    fn read_status(&self) -> ReadStatus;
    fn read_step(&mut self, enable: bool) -> ReadOutcome;
    fn look_ahead(&self) -> bool;
    fn geometry(&self) -> &Geometry;
}

impl ProducerPort for Producer {
    fn write_status(&self) -> WriteStatus {
        self.status()
    }

    fn write_step(&mut self, enable: bool, data: Word) -> WriteOutcome {
        self.tick(enable, data)
    }

    fn geometry(&self) -> &Geometry {
        Producer::geometry(self)
    }
}

impl ConsumerPort for Consumer {
    fn read_status(&self) -> ReadStatus {
        self.status()
    }

    fn read_step(&mut self, enable: bool) -> ReadOutcome {
        self.tick(enable)
    }

    fn look_ahead(&self) -> bool {
        Consumer::look_ahead(self)
    }

    fn geometry(&self) -> &Geometry {
        Consumer::geometry(self)
    }
}

impl ProducerPort for DualClockFifo {
    fn write_status(&self) -> WriteStatus {
        DualClockFifo::write_status(self)
    }

    fn write_step(&mut self, enable: bool, data: Word) -> WriteOutcome {
        DualClockFifo::write_step(self, enable, data)
    }

    fn geometry(&self) -> &Geometry {
        DualClockFifo::geometry(self)
    }
}

impl ConsumerPort for DualClockFifo {
    fn read_status(&self) -> ReadStatus {
        DualClockFifo::read_status(self)
    }

    fn read_step(&mut self, enable: bool) -> ReadOutcome {
        DualClockFifo::read_step(self, enable)
    }

    fn look_ahead(&self) -> bool {
        self.reader().look_ahead()
    }

    fn geometry(&self) -> &Geometry {
        DualClockFifo::geometry(self)
    }
}
