use chrono::{DateTime, Duration, Local};
use rand::distr::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use schedcheck_core::schedule::types::{Action, Schedule, TransactionId};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, Deserialize, Serialize, TypedBuilder)]
pub struct GenParams {
    #[builder(default)]
    pub id: u64,
    /// Number of transactions in the schedule.
    pub n_transaction: u64,
    /// Size of the object alphabet.
    pub n_object: u64,
    /// Minimum reads/writes per transaction (before the terminator).
    #[builder(default = 1)]
    pub min_actions: u64,
    /// Maximum reads/writes per transaction (before the terminator).
    #[builder(default = 3)]
    pub max_actions: u64,
    /// Probability that a transaction ends in an abort instead of a commit.
    #[builder(default = 0.25)]
    pub abort_ratio: f64,
}

/// One generated schedule with its parameters and generation timestamps.
#[derive(Deserialize, Serialize, Debug)]
pub struct ScheduleRecord {
    params: GenParams,
    info: String,
    start: DateTime<Local>,
    end: DateTime<Local>,
    data: Schedule<String>,
}

impl ScheduleRecord {
    #[must_use]
    pub const fn new(
        params: GenParams,
        info: String,
        start: DateTime<Local>,
        end: DateTime<Local>,
        data: Schedule<String>,
    ) -> Self {
        Self {
            params,
            info,
            start,
            end,
            data,
        }
    }

    #[must_use]
    pub const fn get_id(&self) -> u64 {
        self.params.id
    }

    #[must_use]
    pub const fn get_data(&self) -> &Schedule<String> {
        &self.data
    }

    #[must_use]
    pub const fn get_params(&self) -> &GenParams {
        &self.params
    }

    #[must_use]
    pub fn get_duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Object name for alphabet index `i`: single letters `A`..`Z`, then
/// `O26`, `O27`, ... for larger alphabets.
fn object_name(i: u64) -> String {
    u8::try_from(i)
        .ok()
        .filter(|&byte| byte < 26)
        .map_or_else(|| format!("O{i}"), |byte| char::from(b'A' + byte).to_string())
}

/// Generate the actions of one transaction: a random run of reads and
/// writes over the object alphabet, closed by a commit or an abort.
fn generate_transaction<R: Rng>(
    rng: &mut R,
    id: TransactionId,
    abort_ratio: f64,
    object_range: &Uniform<u64>,
    length_range: &Uniform<u64>,
) -> Schedule<String> {
    let length = length_range.sample(rng);
    let mut actions: Schedule<String> = (0..length)
        .map(|_| {
            let object = object_name(object_range.sample(rng));
            if rng.random::<bool>() {
                Action::read(id, object)
            } else {
                Action::write(id, object)
            }
        })
        .collect();
    if rng.random_bool(abort_ratio) {
        actions.push(Action::abort(id));
    } else {
        actions.push(Action::commit(id));
    }
    actions
}

/// Fair random interleaving of per-transaction action sequences.
///
/// Builds a deck holding each transaction's index once per action it
/// contributes, shuffles the deck, then drains each sequence front to
/// back in deck order. Intra-transaction order is preserved by
/// construction.
fn interleave<R: Rng>(rng: &mut R, partitions: Vec<Schedule<String>>) -> Schedule<String> {
    let mut deck: Vec<usize> = partitions
        .iter()
        .enumerate()
        .flat_map(|(index, partition)| core::iter::repeat(index).take(partition.len()))
        .collect();
    deck.shuffle(rng);

    let mut drains: Vec<_> = partitions
        .into_iter()
        .map(|partition| partition.into_iter())
        .collect();
    deck.into_iter()
        .map(|index| {
            drains[index]
                .next()
                .expect("deck multiplicity matches partition length")
        })
        .collect()
}

/// Generate a single random schedule with `n_transaction` transactions
/// over an alphabet of `n_object` objects.
///
/// Every transaction contributes between `min_actions` and `max_actions`
/// reads/writes followed by exactly one terminator (commit, or abort with
/// probability `abort_ratio`). The per-transaction sequences are then
/// interleaved uniformly at random, preserving each transaction's own
/// order.
///
/// # Panics
///
/// Panics if `n_object` is zero or `min_actions > max_actions` (cannot
/// build the uniform distributions).
#[must_use]
pub fn generate_single_schedule(params: &GenParams) -> Schedule<String> {
    let mut rng = rand::rng();
    let object_range = Uniform::new(0, params.n_object).unwrap();
    let length_range = Uniform::new_inclusive(params.min_actions, params.max_actions).unwrap();

    let partitions: Vec<Schedule<String>> = (1..=params.n_transaction)
        .map(|t| {
            generate_transaction(
                &mut rng,
                TransactionId(t),
                params.abort_ratio,
                &object_range,
                &length_range,
            )
        })
        .collect();

    interleave(&mut rng, partitions)
}

/// Generate `n_sched` schedules in parallel.
#[must_use]
pub fn generate_mult_schedules(n_sched: u64, params: &GenParams) -> Vec<ScheduleRecord> {
    (0..n_sched)
        .into_par_iter()
        .map(|i_sched| {
            let start_time = Local::now();
            let schedule = generate_single_schedule(params);
            let end_time = Local::now();
            ScheduleRecord {
                params: GenParams {
                    id: i_sched,
                    ..params.clone()
                },
                info: "generated".to_string(),
                start: start_time,
                end: end_time,
                data: schedule,
            }
        })
        .collect()
}

/// Rejection-sample a schedule satisfying `predicate`.
///
/// Generates up to `max_attempts` schedules and returns the first one the
/// predicate accepts, or `None` if the budget runs out. Useful for
/// building exercise sheets that need a schedule with a particular
/// combination of classification verdicts.
pub fn find_matching<P>(
    params: &GenParams,
    max_attempts: u64,
    predicate: P,
) -> Option<Schedule<String>>
where
    P: Fn(&Schedule<String>) -> bool,
{
    (0..max_attempts)
        .map(|_| generate_single_schedule(params))
        .find(predicate)
}
