#![allow(dead_code)] // Not every test binary uses every helper

use entrylab::trial::{
    Challenge, ChallengeType, Keypress, Layout, Provenance, TimeSpan, Travel, TrialItem, TrialSet,
};

/// Builder for Challenge to keep tests readable
pub struct ChallengeBuilder {
    challenge: Challenge,
}

impl ChallengeBuilder {
    pub fn new(layout: Layout, kind: ChallengeType) -> Self {
        Self {
            challenge: Challenge {
                kind,
                layout,
                prompt: "hello world".to_string(),
                output: "hello world".to_string(),
                recorded_accuracy: None,
                time: TimeSpan {
                    start: 0.0,
                    stop: Some(60.0),
                    duration: Some(60.0),
                },
                keypresses: Vec::new(),
            },
        }
    }

    pub fn prompt(mut self, prompt: &str) -> Self {
        self.challenge.prompt = prompt.to_string();
        self
    }

    pub fn output(mut self, output: &str) -> Self {
        self.challenge.output = output.to_string();
        self
    }

    pub fn text(self, both: &str) -> Self {
        self.prompt(both).output(both)
    }

    pub fn duration(mut self, duration: Option<f64>) -> Self {
        self.challenge.time.duration = duration;
        self
    }

    /// Adds a keypress with an optional rotational travel and press position.
    pub fn press(mut self, rot: Option<[f64; 3]>, pos: Option<[f64; 3]>) -> Self {
        let id = format!("{}", self.challenge.keypresses.len() as f64 * 0.25);
        self.challenge.keypresses.push(Keypress {
            id,
            key: None,
            press_pos: pos,
            travel: rot.map(|r| Travel {
                pos: Some([0.0, 0.0, 0.0]),
                rot: Some(r),
            }),
        });
        self
    }

    pub fn build(self) -> Challenge {
        self.challenge
    }
}

/// Wraps challenges in a single-source trial set
pub fn trial_set(challenges: Vec<Challenge>) -> TrialSet {
    TrialSet {
        provenance: Provenance::Source {
            id: "fixture".to_string(),
        },
        meta: None,
        items: challenges.into_iter().map(TrialItem::Challenge).collect(),
        skipped: 0,
    }
}

/// A small record in the format the experiment harness writes.
pub fn sample_record(layout: &str, prompt: &str, output: &str, duration: f64) -> String {
    format!(
        r#"meta:
  timestamp: "7/16/2020 2:36:27 AM"
  unixseconds: 1594866987
  platform: WindowsPlayer
  xrdevices: []
trial:
  - command: next-layout
  - challenge:
      type: Blind
      layout: {layout}
      prompt: "{prompt}"
      output: "{output}"
      accuracy: 1
      time:
        start: 1.5
        stop: {stop}
        duration: {duration}
      keypresses:
        2.0:
          key: "a"
          travel:
            pos: [0, 0, 0]
            rot: [3, 4, 0]
          pressPos: [0.5, 1.0, -0.25]
        2.5:
          key: "b"
          travel:
            pos: [0, 0, 0]
            rot: [0, 0, 5]
          pressPos: [0.75, 1.0, -0.25]
  - challenge:
      type: Practice
      layout: {layout}
      prompt: "warm up"
      output: "warm up"
      time:
        start: 0
        stop: 10
        duration: 10
      keypresses:
"#,
        layout = layout,
        prompt = prompt,
        output = output,
        stop = 1.5 + duration,
        duration = duration
    )
}
