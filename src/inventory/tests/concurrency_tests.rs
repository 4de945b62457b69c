#[cfg(test)]
mod concurrency_tests {
    use crate::inventory::{Inventory, ItemStack, Stack};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;
    use std::sync::{Arc, Barrier, Mutex};
    use std::thread;
    use std::time::Duration;

    fn total(inventory: &Inventory<Stack>) -> u32 {
        (0..inventory.size())
            .map(|slot| inventory.get(slot).unwrap().count())
            .sum()
    }

    #[test]
    fn concurrent_adds_are_never_lost() {
        // 4 threads x 100 adds x 10 items fits comfortably in 100 slots of 64.
        let inventory = Arc::new(Inventory::new(100));
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let inventory = Arc::clone(&inventory);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..100 {
                        inventory.add(Stack::new(1, 10)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread panicked");
        }

        assert_eq!(total(&inventory), 4000);
        // first-fit packing leaves exactly one partial stack
        let partial = (0..inventory.size())
            .map(|slot| inventory.get(slot).unwrap().count())
            .filter(|&count| count != 0 && count != 64)
            .count();
        assert_eq!(partial, 1);
    }

    #[test]
    fn mixed_traffic_respects_capacity_and_size() {
        let inventory = Arc::new(Inventory::new(8));
        let barrier = Arc::new(Barrier::new(6));

        let handles: Vec<_> = (0..6u16)
            .map(|worker| {
                let inventory = Arc::clone(&inventory);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for round in 0..200u16 {
                        let item = 1 + (worker + round) % 3;
                        let count = 1 + (worker * 7 + round * 13) % 90;
                        match round % 3 {
                            0 | 1 => {
                                let _ = inventory.add(Stack::new(item, count));
                            }
                            _ => {
                                let _ = inventory.remove(Stack::new(item, count));
                            }
                        }
                        let slot = usize::from(round) % inventory.size();
                        let stack = inventory.get(slot).unwrap();
                        assert!(stack.count() <= stack.max_count());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread panicked");
        }

        assert_eq!(inventory.size(), 8);
        assert!(total(&inventory) <= 8 * 64);
    }

    #[test]
    fn change_hook_runs_under_write_lock() {
        let (started_tx, started_rx) = mpsc::channel();
        let started_tx = Mutex::new(started_tx);
        let hook_done = Arc::new(AtomicBool::new(false));
        let done = Arc::clone(&hook_done);

        let inventory = Arc::new(Inventory::with_on_change(2, move |_, _: &Stack| {
            started_tx.lock().unwrap().send(()).unwrap();
            thread::sleep(Duration::from_millis(50));
            done.store(true, Ordering::SeqCst);
        }));

        let writer = {
            let inventory = Arc::clone(&inventory);
            thread::spawn(move || inventory.set(0, Stack::new(1, 1)).unwrap())
        };

        started_rx.recv().unwrap();
        // the read can only get through once the hook has returned and the lock is released
        let stack = inventory.get(0).unwrap();
        assert!(hook_done.load(Ordering::SeqCst));
        assert_eq!(stack, Stack::new(1, 1));

        writer.join().expect("writer panicked");
    }
}
