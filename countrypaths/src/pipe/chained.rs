use super::{Pipe, Producer};

#[derive(Debug)]
pub struct ChainedPipe<I, O, Shared, Error> {
    input: I,
    output: O,
    _s: std::marker::PhantomData<(Shared, Error)>,
}

impl<I, O, Shared, Error> ChainedPipe<I, O, Shared, Error> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            _s: std::marker::PhantomData,
        }
    }
}

/// Pulls from `input` until `output` emits or fails. `output` is closed once
/// the input runs dry.
impl<I, O> Producer for ChainedPipe<I, O, I::Item, O::Error>
where
    I: Producer,
    O: Pipe<Input = I::Item>,
{
    type Item = Result<O::Output, O::Error>;

    fn produce(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.input.produce() {
            match self.output.process(item) {
                Ok(Some(output)) => return Some(Ok(output)),
                Err(err) => return Some(Err(err)),
                Ok(None) => {}
            }
        }
        self.output.close();
        None
    }
}

impl<I, O, Shared, Error> Pipe for ChainedPipe<I, O, Shared, Error>
where
    I: Pipe<Output = Shared, Error = Error>,
    O: Pipe<Input = Shared, Error = Error>,
{
    type Input = I::Input;
    type Output = O::Output;
    type Error = O::Error;

    fn process(&mut self, input: Self::Input) -> Result<Option<Self::Output>, Self::Error> {
        match self.input.process(input)? {
            Some(shared) => self.output.process(shared),
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.input.close();
        self.output.close();
    }
}
